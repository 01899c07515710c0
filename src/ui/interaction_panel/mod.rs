// src/ui/interaction_panel/mod.rs
//
// Interaction panel module: hint label, dialogue box, action menu, and reputation HUD.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export main types
pub use plugin::UiPlugin;
