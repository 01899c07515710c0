//! Systems for the player avatar: spawning, walking, and reputation logging.
use bevy::{ecs::message::MessageReader, prelude::*};

use crate::{
    interaction::events::{ActionResolved, SessionClosed, SessionStarted},
    player::{
        components::{MoveSpeed, Player},
        reputation::{Reputation, ReputationLedger},
    },
};

const PLAYER_SIZE: Vec2 = Vec2::new(22.0, 36.0);
const PLAYER_START: Vec3 = Vec3::new(320.0, 280.0, 2.0);

pub fn spawn_player(mut commands: Commands) {
    let reputation = Reputation::default();
    info!(
        "Spawning player with reputation {} ({})",
        reputation.value(),
        reputation.standing()
    );

    commands.spawn((
        Sprite::from_color(Color::srgb_u8(235, 235, 240), PLAYER_SIZE),
        Transform::from_translation(PLAYER_START),
        Player,
        MoveSpeed::default(),
        reputation,
        Name::new("Player"),
    ));
}

/// Direction from WASD / arrow keys, normalised so diagonals are not faster.
pub fn movement_direction(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let pressed = |keys: [KeyCode; 2]| keyboard.any_pressed(keys);

    let mut direction = Vec2::ZERO;
    if pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    if pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    direction.normalize_or_zero()
}

pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut players: Query<(&MoveSpeed, &mut Transform), With<Player>>,
) {
    let direction = movement_direction(&keyboard);
    if direction == Vec2::ZERO {
        return;
    }

    let delta = time.delta_secs();
    for (speed, mut transform) in players.iter_mut() {
        transform.translation += (direction * speed.0 * delta).extend(0.0);
    }
}

/// Logs every resolved action together with the player's new standing.
pub fn log_action_results(
    mut results: MessageReader<ActionResolved>,
    players: Query<&Reputation, With<Player>>,
) {
    for message in results.read() {
        let outcome = message.outcome;
        let Ok(reputation) = players.single() else {
            warn!("Action resolved for {} but no player exists", message.npc);
            continue;
        };
        info!(
            "{} {} against {}: reputation {:+} -> {} ({})",
            outcome.kind,
            if outcome.success { "succeeded" } else { "failed" },
            message.npc,
            outcome.reputation_delta,
            reputation.value(),
            reputation.standing()
        );
    }
}

/// Logs conversations opening and closing.
pub fn log_session_lifecycle(
    mut started: MessageReader<SessionStarted>,
    mut closed: MessageReader<SessionClosed>,
) {
    for message in started.read() {
        info!("Talking to {} ({})", message.name, message.npc);
    }
    for message in closed.read() {
        info!("Conversation with {} ended: {}", message.npc, message.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_normalised() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowRight);

        let direction = movement_direction(&keyboard);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.x > 0.0 && direction.y > 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyD);
        assert_eq!(movement_direction(&keyboard), Vec2::ZERO);
    }

    #[test]
    fn session_lifecycle_logger_runs_with_pending_messages() {
        use bevy::ecs::system::RunSystemOnce;

        use crate::{interaction::session::CloseReason, npc::components::NpcId};

        let mut app = App::new();
        app.add_message::<SessionStarted>()
            .add_message::<SessionClosed>();
        app.world_mut().write_message(SessionStarted {
            npc: NpcId::new(7),
            name: "Merchant-07".to_string(),
        });
        app.world_mut().write_message(SessionClosed {
            npc: NpcId::new(7),
            reason: CloseReason::Resolved,
        });

        app.world_mut()
            .run_system_once(log_session_lifecycle)
            .expect("logger runs");
    }

    #[test]
    fn spawned_player_starts_with_default_reputation() {
        let mut app = App::new();
        app.add_systems(Startup, spawn_player);
        app.update();

        let world = app.world_mut();
        let mut players = world.query_filtered::<&Reputation, With<Player>>();
        let reputation = *players.single(world).expect("one player");
        assert_eq!(reputation, Reputation::default());
    }
}
