// src/ui/interaction_panel/plugin.rs
//
// UiPlugin spawns the interaction UI and refreshes it from the NPC manager each frame.

use bevy::prelude::*;

use crate::interaction::systems::report_closed_sessions;

use super::components::InteractionPanelSettings;
use super::systems::{
    spawn_interaction_ui, update_action_slots, update_dialogue_box, update_interaction_hint,
    update_reputation_hud,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<InteractionPanelSettings>()
            .add_systems(Startup, spawn_interaction_ui)
            .add_systems(
                Update,
                (
                    update_interaction_hint,
                    update_dialogue_box,
                    update_action_slots,
                    update_reputation_hud,
                )
                    .after(report_closed_sessions),
            );
    }
}
