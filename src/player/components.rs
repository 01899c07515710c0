//! Components for the player avatar.
use bevy::prelude::*;

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Walking speed in world units per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct MoveSpeed(pub f32);

impl Default for MoveSpeed {
    fn default() -> Self {
        Self(200.0)
    }
}
