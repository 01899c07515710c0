//! Interaction module: dialogue presentation, action menus, and the session state machine.
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod events;
pub mod fade;
pub mod menu;
pub mod plugin;
pub mod resolution;
pub mod reveal;
pub mod session;
pub mod systems;

pub use plugin::InteractionPlugin;
