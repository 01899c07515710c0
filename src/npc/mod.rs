//! NPC module: roster data, proximity lookup, and the interaction manager.
pub mod components;
pub mod manager;
pub mod plugin;
pub mod proximity;
pub mod seed;
pub mod systems;

pub use plugin::NpcPlugin;
