use bevy::prelude::*;

mod interaction;
mod localization;
mod npc;
mod player;
mod ui;
mod world;

use crate::{
    interaction::InteractionPlugin, localization::LocalizationPlugin, npc::NpcPlugin,
    player::PlayerPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Harborfolk".to_string(),
                    ..default()
                }),
                ..default()
            }),
            LocalizationPlugin,
            InteractionPlugin,
            WorldPlugin,
            PlayerPlugin,
            NpcPlugin,
            UiPlugin,
        ))
        .run();
}
