//! Player plugin wiring the avatar, movement, and reputation logging.
use bevy::prelude::*;

use crate::{
    interaction::systems::{handle_menu_click, report_closed_sessions, update_interactions},
    player::systems::{log_action_results, log_session_lifecycle, move_player, spawn_player},
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player).add_systems(
            Update,
            (
                move_player.before(update_interactions),
                log_action_results.after(handle_menu_click),
                log_session_lifecycle.after(report_closed_sessions),
            ),
        );
    }
}
