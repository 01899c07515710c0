//! Systems that seed the NPC roster and keep NPC sprites in sync with it.
use bevy::prelude::*;

use crate::npc::{
    components::{NpcCategory, NpcVisual},
    manager::NpcManager,
    seed::load_roster,
};

const NPC_SIZE: Vec2 = Vec2::new(24.0, 40.0);
const NPC_LAYER: f32 = 1.0;
const HIGHLIGHT_MIX: f32 = 0.35;

fn category_color(category: NpcCategory) -> Color {
    match category {
        NpcCategory::Civilian => Color::srgb_u8(170, 170, 160),
        NpcCategory::Merchant => Color::srgb_u8(210, 170, 60),
        NpcCategory::HarborMaster => Color::srgb_u8(70, 110, 190),
        NpcCategory::TavernKeeper => Color::srgb_u8(160, 90, 60),
        NpcCategory::WanderingMerchant => Color::srgb_u8(120, 170, 90),
    }
}

/// Loads the roster into [`NpcManager`] and spawns one sprite per NPC.
pub fn spawn_npcs(mut commands: Commands, mut manager: ResMut<NpcManager>) {
    for npc in load_roster() {
        let id = npc.id;
        let name = format!("{} ({})", npc.display_name, id);
        let color = category_color(npc.category);
        let position = npc.position;

        if !manager.add_npc(npc) {
            continue;
        }
        commands.spawn((
            Sprite::from_color(color, NPC_SIZE),
            Transform::from_translation(position.extend(NPC_LAYER)),
            NpcVisual { id },
            Name::new(name),
        ));
    }

    info!("Seeded {} NPCs", manager.npcs().len());
}

/// Brightens the sprite of the NPC the player can currently engage.
pub fn highlight_engageable_npc(
    manager: Res<NpcManager>,
    mut sprites: Query<(&NpcVisual, &mut Sprite)>,
) {
    let engageable = manager
        .closest()
        .filter(|closest| closest.in_range)
        .map(|closest| closest.npc.id);

    for (visual, mut sprite) in sprites.iter_mut() {
        let Some(npc) = manager.npc(visual.id) else {
            continue;
        };
        let base = category_color(npc.category);
        sprite.color = if engageable == Some(visual.id) {
            Color::from(base.to_srgba().mix(&Srgba::WHITE, HIGHLIGHT_MIX))
        } else {
            base
        };
    }
}
