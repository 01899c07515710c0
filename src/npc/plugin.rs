//! NPC plugin wiring the roster seed and sprite highlighting.
use bevy::prelude::*;

use crate::{
    interaction::systems::update_interactions,
    npc::systems::{highlight_engageable_npc, spawn_npcs},
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_npcs)
            .add_systems(Update, highlight_engageable_npc.after(update_interactions));
    }
}
