//! Player module - avatar movement and the reputation interactions act upon.

pub mod components;
pub mod plugin;
pub mod reputation;
pub mod systems;

pub use plugin::PlayerPlugin;
