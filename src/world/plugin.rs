//! WorldPlugin sets up the harbor backdrop and the player-following camera.
use bevy::prelude::*;

use crate::{
    interaction::systems::update_interactions,
    world::systems::{follow_player, spawn_world_environment},
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment)
            .add_systems(Update, follow_player.after(update_interactions));
    }
}
