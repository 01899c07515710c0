//! Systems bridging Bevy input and time into the [`NpcManager`].
use bevy::{ecs::message::MessageWriter, prelude::*, window::PrimaryWindow};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    localization::LocalizationTable,
    npc::manager::NpcManager,
    player::{components::Player, reputation::Reputation},
};

use super::{
    events::{ActionResolved, SessionClosed, SessionStarted},
    menu::{dialogue_box_bounds, MenuLayout, MENU_ITEM_SIZE, MENU_ITEM_SPACING},
    session::{InteractionResponse, SessionState},
};

/// Random source for steal attempts.
#[derive(Resource)]
pub struct InteractionRng(pub StdRng);

impl Default for InteractionRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Advances proximity, fades, and the active session by the frame delta.
pub fn update_interactions(
    time: Res<Time>,
    mut manager: ResMut<NpcManager>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    manager.update(time.delta_secs(), player.translation.truncate());
}

/// `E` opens a conversation with the nearest NPC or advances the current one.
pub fn handle_interact_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    table: Res<LocalizationTable>,
    mut manager: ResMut<NpcManager>,
    mut players: Query<&mut Reputation, With<Player>>,
    mut started: MessageWriter<SessionStarted>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok(mut reputation) = players.single_mut() else {
        return;
    };

    match manager.handle_interaction(&mut *reputation, &*table) {
        InteractionResponse::Started(npc) => {
            let name = manager
                .npc(npc)
                .map(|npc| npc.display_name.clone())
                .unwrap_or_else(|| npc.to_string());
            started.write(SessionStarted { npc, name });
        }
        InteractionResponse::Ignored => {
            debug!(target: "interaction", "Interact pressed with nothing to engage");
        }
        response => {
            debug!(target: "interaction", "Interact press: {:?}", response);
        }
    }
}

/// Assigns screen regions to the menu rows, centred in the dialogue box.
pub fn layout_action_menu(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut manager: ResMut<NpcManager>,
) {
    let Some(count) = manager
        .action_menu()
        .filter(|menu| !menu.is_empty())
        .map(|menu| menu.len())
    else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let layout = MenuLayout::centered(
        dialogue_box_bounds(window.size()),
        MENU_ITEM_SIZE,
        MENU_ITEM_SPACING,
        count,
    );
    manager.layout_action_menu(&layout);
}

pub fn track_menu_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut manager: ResMut<NpcManager>,
) {
    if manager.state() != SessionState::ActionMenu {
        return;
    }
    let Some(position) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    manager.handle_pointer(position);
}

/// Left click over an enabled menu row resolves that action.
pub fn handle_menu_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut manager: ResMut<NpcManager>,
    mut rng: ResMut<InteractionRng>,
    mut players: Query<&mut Reputation, With<Player>>,
    mut resolved: MessageWriter<ActionResolved>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(position) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let Ok(mut reputation) = players.single_mut() else {
        return;
    };
    let Some(npc) = manager.session().active_npc() else {
        return;
    };

    if let Some(outcome) = manager.handle_click(position, &mut *reputation, &mut rng.0) {
        resolved.write(ActionResolved { npc, outcome });
    }
}

/// Emits [`SessionClosed`] once per close.
pub fn report_closed_sessions(
    mut manager: ResMut<NpcManager>,
    mut closed: MessageWriter<SessionClosed>,
) {
    for session in manager.take_closed_sessions() {
        closed.write(SessionClosed {
            npc: session.npc,
            reason: session.reason,
        });
    }
}

#[cfg(feature = "interaction_debug")]
#[derive(Resource)]
pub struct InteractionTraceTimer(pub Timer);

#[cfg(feature = "interaction_debug")]
impl Default for InteractionTraceTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

#[cfg(feature = "interaction_debug")]
pub fn trace_session_state(
    time: Res<Time>,
    mut timer: ResMut<InteractionTraceTimer>,
    manager: Res<NpcManager>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let closest = manager
        .closest()
        .map(|closest| {
            let reach = if closest.in_range { "in range" } else { "out of range" };
            format!("{} ({})", closest.npc.display_name, reach)
        })
        .unwrap_or_else(|| "none".to_string());
    info!(
        target: "interaction_debug",
        "state: {} | npc: {} | closest: {} | hint alpha: {}",
        manager.state().label(),
        manager.session().active_npc_name().unwrap_or("-"),
        closest,
        manager.hint_alpha()
    );
}
