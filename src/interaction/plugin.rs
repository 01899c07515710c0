//! InteractionPlugin registers settings, the NPC manager, and the input-bridging systems.
use bevy::prelude::*;

use crate::npc::manager::NpcManager;

#[cfg(feature = "interaction_debug")]
use super::systems::{trace_session_state, InteractionTraceTimer};
use super::{
    config::InteractionSettings,
    events::{ActionResolved, SessionClosed, SessionStarted},
    systems::{
        handle_interact_key, handle_menu_click, layout_action_menu, report_closed_sessions,
        track_menu_pointer, update_interactions, InteractionRng,
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::load_or_default();
        info!(
            "Interaction configured: range {:.0}, {:.0} chars/s, steal cap {:.2}",
            settings.interaction_range,
            settings.chars_per_second,
            settings.reputation.steal_chance_cap
        );

        app.insert_resource(NpcManager::new(&settings))
            .insert_resource(settings)
            .init_resource::<InteractionRng>()
            .add_message::<SessionStarted>()
            .add_message::<ActionResolved>()
            .add_message::<SessionClosed>()
            .add_systems(
                Update,
                (
                    update_interactions,
                    handle_interact_key,
                    layout_action_menu,
                    track_menu_pointer,
                    handle_menu_click,
                    report_closed_sessions,
                )
                    .chain(),
            );

        #[cfg(feature = "interaction_debug")]
        {
            app.init_resource::<InteractionTraceTimer>()
                .add_systems(Update, trace_session_state.after(report_closed_sessions));
        }
    }
}
