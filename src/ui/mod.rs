// src/ui/mod.rs
//
// UI module providing screen-space elements for NPC interactions.
//
// Current features:
// - Interaction hint above the closest NPC
// - Dialogue box with typewriter text and portrait caption
// - Action menu rows inside the dialogue box
// - Reputation gauge (top-left corner)

pub mod interaction_panel;

// Re-export the main plugin
pub use interaction_panel::UiPlugin;
