//! Localization module resolving dialogue keys into display text.
pub mod plugin;
pub mod table;

pub use plugin::LocalizationPlugin;
pub use table::{LocalizationTable, TextResolver};
