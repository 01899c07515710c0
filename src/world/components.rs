//! Components used by the world module.
use bevy::prelude::*;

/// Marker for the 2D camera that renders the harbor and projects world positions for the UI.
#[derive(Component, Debug, Default)]
pub struct MainCamera;

/// How quickly the camera catches up with the player (per second).
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraFollow {
    pub stiffness: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self { stiffness: 4.0 }
    }
}
