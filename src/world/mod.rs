//! World module housing the backdrop and camera.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
