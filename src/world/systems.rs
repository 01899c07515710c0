//! Systems for the world module.
use bevy::prelude::*;

use crate::{
    player::components::Player,
    world::components::{CameraFollow, MainCamera},
};

const HARBOR_CENTER: Vec2 = Vec2::new(400.0, 300.0);
const GROUND_SIZE: Vec2 = Vec2::new(1400.0, 900.0);
const WATER_HEIGHT: f32 = 260.0;

/// Spawns the harbor backdrop and the main camera.
pub fn spawn_world_environment(mut commands: Commands) {
    commands.spawn((
        Sprite::from_color(Color::srgb_u8(96, 128, 84), GROUND_SIZE),
        Transform::from_translation(HARBOR_CENTER.extend(-10.0)),
        Name::new("Ground"),
    ));

    let water_center = Vec2::new(
        HARBOR_CENTER.x,
        HARBOR_CENTER.y + (GROUND_SIZE.y + WATER_HEIGHT) * 0.5,
    );
    commands.spawn((
        Sprite::from_color(
            Color::srgb_u8(48, 92, 140),
            Vec2::new(GROUND_SIZE.x, WATER_HEIGHT),
        ),
        Transform::from_translation(water_center.extend(-9.0)),
        Name::new("Harbor water"),
    ));

    commands.spawn((
        Camera2d,
        Transform::from_translation(HARBOR_CENTER.extend(100.0)),
        MainCamera,
        CameraFollow::default(),
    ));
}

/// Eases the camera toward the player, scaled by the frame delta.
pub fn follow_player(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut cameras: Query<(&CameraFollow, &mut Transform), With<MainCamera>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let target = player.translation.truncate();

    for (follow, mut transform) in cameras.iter_mut() {
        let factor = (follow.stiffness * time.delta_secs()).min(1.0);
        let current = transform.translation.truncate();
        let next = current.lerp(target, factor);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
