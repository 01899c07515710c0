// src/ui/interaction_panel/components.rs
//
// Components and resources for the interaction hint, dialogue box, action menu, and HUD.

use bevy::prelude::*;

use crate::interaction::catalog::ActionKind;

/// Floating "press E" label projected above the closest NPC.
#[derive(Component, Debug)]
pub struct InteractionHint;

/// Root node of the dialogue box.
#[derive(Component, Debug)]
pub struct DialogueBox;

/// Which text inside the dialogue box an entity renders.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueText {
    Speaker,
    Body,
    Portrait,
    MoreIndicator,
}

/// Pre-spawned action menu row; shows the menu item with the same index.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActionSlot {
    pub index: usize,
}

/// Label inside an [`ActionSlot`].
#[derive(Component, Debug, Clone, Copy)]
pub struct ActionSlotLabel {
    pub index: usize,
}

/// Filled part of the reputation gauge.
#[derive(Component, Debug)]
pub struct ReputationFill;

/// Text next to the reputation gauge.
#[derive(Component, Debug)]
pub struct ReputationLabel;

/// Resource containing visual settings for the interaction UI.
#[derive(Resource, Debug, Clone)]
pub struct InteractionPanelSettings {
    /// Localized hint text, resolved once at startup.
    pub hint_text: String,

    /// Vertical offset of the hint above the NPC (world units).
    pub hint_offset: f32,

    /// Number of menu slots spawned up front; never fewer than
    /// [`ActionKind::MENU_KINDS`].
    pub menu_slots: usize,

    pub padding: f32,
    pub border_width: f32,
    pub name_font_size: f32,
    pub text_font_size: f32,
    pub hint_font_size: f32,
    pub gauge_width: f32,
    pub gauge_height: f32,
}

impl Default for InteractionPanelSettings {
    fn default() -> Self {
        Self {
            hint_text: "Press E to interact".to_string(),
            hint_offset: 50.0,
            menu_slots: ActionKind::MENU_KINDS.len(),
            padding: 14.0,
            border_width: 2.0,
            name_font_size: 20.0,
            text_font_size: 17.0,
            hint_font_size: 16.0,
            gauge_width: 200.0,
            gauge_height: 14.0,
        }
    }
}
