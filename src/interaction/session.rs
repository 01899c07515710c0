//! The interaction state machine: dialogue, then an action menu, then close.
use std::fmt;

use bevy::prelude::*;
use rand::Rng;

use crate::{
    localization::TextResolver,
    npc::components::{Npc, NpcCategory, NpcId},
    player::reputation::ReputationLedger,
};

use super::{
    catalog::InteractionCatalog,
    config::{InteractionSettings, ReputationRules},
    dialogue::{DialogueMessage, DialoguePresenter, DialogueView},
    menu::{ActionMenuPresenter, MenuLayout},
    resolution::{resolve_action, ActionOutcome},
};

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Dialogue,
    ActionMenu,
    /// Transient; collapses to `Idle` on the next update.
    Closed,
}

impl SessionState {
    #[cfg(feature = "interaction_debug")]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dialogue => "dialogue",
            Self::ActionMenu => "action menu",
            Self::Closed => "closed",
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Resolved,
    OutOfRange,
    NothingToOffer,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolved => "action resolved",
            Self::OutOfRange => "player walked away",
            Self::NothingToOffer => "nothing to offer",
        };
        f.write_str(label)
    }
}

/// A session that ended and has not yet been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSession {
    pub npc: NpcId,
    pub reason: CloseReason,
}

/// What an interact press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponse {
    Ignored,
    Started(NpcId),
    TypingSkipped,
    NextMessage,
    MenuOpened,
    Closed(CloseReason),
}

#[derive(Debug, Clone)]
struct ActiveNpc {
    id: NpcId,
    name: String,
    category: NpcCategory,
    position: Vec2,
}

impl ActiveNpc {
    fn from_npc(npc: &Npc) -> Self {
        Self {
            id: npc.id,
            name: npc.display_name.clone(),
            category: npc.category,
            position: npc.position,
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dialogue {
        npc: ActiveNpc,
        messages: Vec<DialogueMessage>,
        index: usize,
    },
    ActionMenu {
        npc: ActiveNpc,
        menu: ActionMenuPresenter,
    },
    Closed {
        npc: ActiveNpc,
    },
}

/// One conversation with one NPC, from first line to resolution or abandonment.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    phase: Phase,
    dialogue: DialoguePresenter,
    catalog: InteractionCatalog,
    rules: ReputationRules,
    interaction_range: f32,
    /// Closes queued until [`InteractionSession::take_closed`] drains them.
    unreported: Vec<ClosedSession>,
}

impl InteractionSession {
    pub fn new(settings: &InteractionSettings) -> Self {
        Self {
            phase: Phase::Idle,
            dialogue: DialoguePresenter::new(
                settings.chars_per_second,
                settings.dialogue_fade_rate,
            ),
            catalog: settings.catalog.clone(),
            rules: settings.reputation.clone(),
            interaction_range: settings.interaction_range,
            unreported: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Dialogue { .. } => SessionState::Dialogue,
            Phase::ActionMenu { .. } => SessionState::ActionMenu,
            Phase::Closed { .. } => SessionState::Closed,
        }
    }

    /// True while in `Dialogue` or `ActionMenu`.
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            Phase::Dialogue { .. } | Phase::ActionMenu { .. }
        )
    }

    pub fn rules(&self) -> &ReputationRules {
        &self.rules
    }

    fn active(&self) -> Option<&ActiveNpc> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Dialogue { npc, .. }
            | Phase::ActionMenu { npc, .. }
            | Phase::Closed { npc, .. } => Some(npc),
        }
    }

    pub fn active_npc(&self) -> Option<NpcId> {
        self.active().map(|npc| npc.id)
    }

    pub fn active_npc_name(&self) -> Option<&str> {
        self.active().map(|npc| npc.name.as_str())
    }

    /// Where the engaged NPC stood when the session began.
    pub fn npc_position(&self) -> Option<Vec2> {
        self.active().map(|npc| npc.position)
    }

    pub fn current_message(&self) -> Option<&DialogueMessage> {
        match &self.phase {
            Phase::Dialogue {
                messages, index, ..
            } => messages.get(*index),
            _ => None,
        }
    }

    /// Drains every close since the last call, oldest first.
    ///
    /// Survives the `Closed` → `Idle` collapse, so a close followed by a new
    /// `start` in the same frame is still reported.
    pub fn take_closed(&mut self) -> Vec<ClosedSession> {
        std::mem::take(&mut self.unreported)
    }

    pub fn action_menu(&self) -> Option<&ActionMenuPresenter> {
        match &self.phase {
            Phase::ActionMenu { menu, .. } => Some(menu),
            _ => None,
        }
    }

    pub fn dialogue_view(&self) -> Option<DialogueView<'_>> {
        self.current_message()
            .map(|message| self.dialogue.view(message))
    }

    pub fn dialogue_alpha(&self) -> u8 {
        self.dialogue.alpha()
    }

    /// Begins a conversation with `npc`. Returns `false` if one is already running.
    pub fn start<T>(&mut self, npc: &Npc, resolver: &T) -> bool
    where
        T: TextResolver + ?Sized,
    {
        if self.is_active() {
            return false;
        }
        if matches!(self.phase, Phase::Closed { .. }) {
            self.collapse();
        }

        let messages = DialogueMessage::resolve_all(npc, resolver);
        let active = ActiveNpc::from_npc(npc);
        info!(
            target: "interaction",
            "Starting dialogue with {} ({}, {}) - {} lines",
            active.name,
            active.id,
            active.category,
            messages.len()
        );

        if messages.is_empty() {
            self.dialogue.set_visible(true);
            self.open_menu(active);
        } else {
            self.dialogue.show(&messages[0]);
            self.phase = Phase::Dialogue {
                npc: active,
                messages,
                index: 0,
            };
        }
        true
    }

    /// Handles an interact press while the dialogue is showing.
    pub fn advance(&mut self) -> InteractionResponse {
        let Phase::Dialogue {
            messages, index, ..
        } = &mut self.phase
        else {
            return InteractionResponse::Ignored;
        };

        if !self.dialogue.is_complete() {
            self.dialogue.force_complete();
            return InteractionResponse::TypingSkipped;
        }

        *index += 1;
        if let Some(next) = messages.get(*index) {
            self.dialogue.show(next);
            return InteractionResponse::NextMessage;
        }

        let npc = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dialogue { npc, .. } => npc,
            other => {
                self.phase = other;
                return InteractionResponse::Ignored;
            }
        };
        self.open_menu(npc)
    }

    fn open_menu(&mut self, npc: ActiveNpc) -> InteractionResponse {
        let actions = self.catalog.actions_for(npc.category);
        if actions.is_empty() {
            debug!(
                target: "interaction",
                "{} has no actions for category {}",
                npc.name,
                npc.category
            );
            self.close(npc, CloseReason::NothingToOffer);
            return InteractionResponse::Closed(CloseReason::NothingToOffer);
        }

        let menu = ActionMenuPresenter::from_actions(actions);
        debug!(
            target: "interaction",
            "Offering {} actions for {}",
            menu.len(),
            npc.name
        );
        self.phase = Phase::ActionMenu { npc, menu };
        InteractionResponse::MenuOpened
    }

    /// Per-frame tick: range check, presenter animation, and `Closed` → `Idle`.
    pub fn update(&mut self, delta_seconds: f32, player_position: Vec2, npc_position: Vec2) {
        match self.state() {
            SessionState::Idle => {}
            SessionState::Closed => self.collapse(),
            SessionState::Dialogue | SessionState::ActionMenu => {
                if player_position.distance(npc_position) > self.interaction_range {
                    self.abandon();
                    return;
                }
                let message = match &self.phase {
                    Phase::Dialogue {
                        messages, index, ..
                    } => messages.get(*index),
                    _ => None,
                };
                self.dialogue.update(delta_seconds, message);
            }
        }
    }

    pub fn layout_menu(&mut self, layout: &MenuLayout) {
        if let Phase::ActionMenu { menu, .. } = &mut self.phase {
            menu.layout(layout);
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Phase::ActionMenu { menu, .. } = &mut self.phase {
            menu.update_hover(position);
        }
    }

    /// Resolves the enabled action under `position`, then closes the session.
    pub fn click<L, R>(&mut self, position: Vec2, player: &mut L, rng: &mut R) -> Option<ActionOutcome>
    where
        L: ReputationLedger + ?Sized,
        R: Rng + ?Sized,
    {
        let Phase::ActionMenu { menu, .. } = &self.phase else {
            return None;
        };
        let kind = menu.action_at(position)?;

        let outcome = resolve_action(kind, player, &self.rules, rng);
        if let Phase::ActionMenu { npc, .. } = std::mem::replace(&mut self.phase, Phase::Idle) {
            info!(
                target: "interaction",
                "{} with {}: {} (reputation {:+})",
                kind,
                npc.name,
                if outcome.success { "success" } else { "failure" },
                outcome.reputation_delta
            );
            self.close(npc, CloseReason::Resolved);
        }
        Some(outcome)
    }

    fn abandon(&mut self) {
        let npc = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dialogue { npc, .. } | Phase::ActionMenu { npc, .. } => npc,
            other => {
                self.phase = other;
                return;
            }
        };
        self.close(npc, CloseReason::OutOfRange);
    }

    fn close(&mut self, npc: ActiveNpc, reason: CloseReason) {
        info!(
            target: "interaction",
            "Closing session with {}: {}",
            npc.name,
            reason
        );
        self.dialogue.set_visible(false);
        self.unreported.push(ClosedSession { npc: npc.id, reason });
        self.phase = Phase::Closed { npc };
    }

    fn collapse(&mut self) {
        self.phase = Phase::Idle;
        self.dialogue.reset();
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::{
        interaction::catalog::ActionKind,
        player::reputation::Reputation,
    };

    fn settings() -> InteractionSettings {
        InteractionSettings::default()
    }

    fn echo(key: &str) -> String {
        format!("[{key}]")
    }

    fn npc(category: NpcCategory, keys: &[&str]) -> Npc {
        Npc::new(NpcId::new(3), "Civilian-21", category, Vec2::new(100.0, 100.0))
            .with_dialogue_keys(keys.iter().copied())
    }

    fn menu_layout() -> MenuLayout {
        MenuLayout {
            origin: Vec2::ZERO,
            item_size: Vec2::new(100.0, 20.0),
            spacing: 0.0,
        }
    }

    #[test]
    fn idle_session_ignores_input() {
        let mut session = InteractionSession::new(&settings());
        assert_eq!(session.advance(), InteractionResponse::Ignored);

        let mut player = Reputation::default();
        let outcome = session.click(Vec2::ZERO, &mut player, &mut StepRng::new(0, 0));
        assert!(outcome.is_none());

        session.update(1.0, Vec2::ZERO, Vec2::splat(999.0));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn start_refuses_a_second_conversation() {
        let mut session = InteractionSession::new(&settings());
        let talker = npc(NpcCategory::Civilian, &["civilian-01"]);

        assert!(session.start(&talker, &echo));
        assert!(!session.start(&talker, &echo));
        assert_eq!(session.state(), SessionState::Dialogue);
        assert_eq!(session.current_message().map(|m| m.text.as_str()), Some("[civilian-01]"));
    }

    #[test]
    fn distance_breach_closes_dialogue_mid_sentence() {
        let mut session = InteractionSession::new(&settings());
        let talker = npc(NpcCategory::Civilian, &["civilian-01", "civilian-02"]);
        session.start(&talker, &echo);
        session.update(0.01, Vec2::new(110.0, 100.0), talker.position);
        assert_eq!(session.state(), SessionState::Dialogue);
        assert!(!session.dialogue.is_complete());

        session.update(0.01, Vec2::new(250.0, 100.0), talker.position);
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(
            session.take_closed(),
            vec![ClosedSession {
                npc: NpcId::new(3),
                reason: CloseReason::OutOfRange
            }]
        );

        session.update(0.01, Vec2::new(250.0, 100.0), talker.position);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.active_npc(), None);
        assert_eq!(session.dialogue_alpha(), 0);
    }

    #[test]
    fn walking_away_from_the_menu_abandons_it() {
        let mut session = InteractionSession::new(&settings());
        let talker = npc(NpcCategory::Civilian, &[]);
        session.start(&talker, &echo);
        assert_eq!(session.state(), SessionState::ActionMenu);

        session.update(0.01, Vec2::new(400.0, 400.0), talker.position);
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.action_menu().is_none());
    }

    #[test]
    fn empty_dialogue_goes_straight_to_the_menu() {
        let mut session = InteractionSession::new(&settings());
        assert!(session.start(&npc(NpcCategory::Civilian, &[]), &echo));

        assert_eq!(session.state(), SessionState::ActionMenu);
        let kinds: Vec<ActionKind> = session
            .action_menu()
            .map(|menu| menu.items().iter().map(|item| item.kind).collect())
            .unwrap_or_default();
        assert_eq!(kinds, vec![ActionKind::Steal]);
    }

    #[test]
    fn category_without_actions_closes_after_dialogue() {
        let mut settings = settings();
        settings.catalog = InteractionCatalog::empty();
        let mut session = InteractionSession::new(&settings);
        session.start(&npc(NpcCategory::Merchant, &["merchant-01"]), &echo);

        assert_eq!(session.advance(), InteractionResponse::TypingSkipped);
        assert_eq!(
            session.advance(),
            InteractionResponse::Closed(CloseReason::NothingToOffer)
        );
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn click_outside_items_keeps_menu_open() {
        let mut session = InteractionSession::new(&settings());
        let talker = npc(NpcCategory::Civilian, &[]);
        session.start(&talker, &echo);
        session.layout_menu(&menu_layout());

        let mut player = Reputation::new(50);
        assert!(session
            .click(Vec2::new(300.0, 300.0), &mut player, &mut StepRng::new(0, 0))
            .is_none());
        assert_eq!(session.state(), SessionState::ActionMenu);

        session.pointer_moved(Vec2::new(10.0, 10.0));
        assert_eq!(session.action_menu().and_then(|menu| menu.hovered()), Some(0));

        let outcome = session
            .click(Vec2::new(10.0, 10.0), &mut player, &mut StepRng::new(0, 0))
            .expect("steal row was clicked");
        assert!(outcome.success);
        assert_eq!(player.value(), 40);
        assert_eq!(
            session.take_closed().first().map(|closed| closed.reason),
            Some(CloseReason::Resolved)
        );
    }

    #[test]
    fn closed_session_can_restart_before_collapsing() {
        let mut session = InteractionSession::new(&settings());
        let talker = npc(NpcCategory::Civilian, &["civilian-01"]);
        session.start(&talker, &echo);
        session.update(0.01, Vec2::splat(1000.0), talker.position);
        assert_eq!(session.state(), SessionState::Closed);

        assert!(session.start(&talker, &echo));
        assert_eq!(session.state(), SessionState::Dialogue);
        assert_eq!(
            session.current_message().map(|m| m.text.as_str()),
            Some("[civilian-01]")
        );
    }

    #[test]
    fn close_is_still_reported_after_an_immediate_restart() {
        let mut session = InteractionSession::new(&settings());
        let first = npc(NpcCategory::Civilian, &["civilian-01"]);
        let second = Npc::new(NpcId::new(9), "Merchant-09", NpcCategory::Merchant, Vec2::ZERO)
            .with_dialogue_keys(["merchant-01"]);

        session.start(&first, &echo);
        session.update(0.01, Vec2::splat(1000.0), first.position);
        assert!(session.start(&second, &echo));
        assert_eq!(session.active_npc(), Some(NpcId::new(9)));

        assert_eq!(
            session.take_closed(),
            vec![ClosedSession {
                npc: NpcId::new(3),
                reason: CloseReason::OutOfRange
            }]
        );
        assert!(session.take_closed().is_empty());
    }
}
