//! Owns the NPC roster, the interaction hint, and the single interaction session.
use bevy::prelude::*;
use rand::Rng;

use crate::{
    interaction::{
        config::InteractionSettings,
        fade::FadeValue,
        menu::{ActionMenuPresenter, MenuLayout},
        resolution::{reward_talk, ActionOutcome},
        session::{ClosedSession, InteractionResponse, InteractionSession, SessionState},
    },
    localization::TextResolver,
    player::reputation::ReputationLedger,
};

use super::{
    components::{Npc, NpcId},
    proximity::{nearest, Nearest},
};

/// The NPC closest to the player on the last update.
#[derive(Debug, Clone, Copy)]
pub struct ClosestNpc<'a> {
    pub npc: &'a Npc,
    pub in_range: bool,
}

#[derive(Resource, Debug)]
pub struct NpcManager {
    npcs: Vec<Npc>,
    session: InteractionSession,
    hint: FadeValue,
    closest: Option<Nearest>,
    interaction_range: f32,
}

impl NpcManager {
    pub fn new(settings: &InteractionSettings) -> Self {
        Self {
            npcs: Vec::new(),
            session: InteractionSession::new(settings),
            hint: FadeValue::new(settings.hint_fade_rate),
            closest: None,
            interaction_range: settings.interaction_range,
        }
    }

    /// Adds `npc` to the roster. Returns `false` if its id is already taken.
    pub fn add_npc(&mut self, npc: Npc) -> bool {
        if self.npc(npc.id).is_some() {
            warn!("Ignoring duplicate NPC id {} ({})", npc.id, npc.display_name);
            return false;
        }
        self.npcs.push(npc);
        true
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn closest(&self) -> Option<ClosestNpc<'_>> {
        let nearest = self.closest?;
        let npc = self.npcs.get(nearest.index)?;
        Some(ClosestNpc {
            npc,
            in_range: nearest.distance <= self.interaction_range,
        })
    }

    pub fn hint_alpha(&self) -> u8 {
        self.hint.alpha()
    }

    pub fn action_menu(&self) -> Option<&ActionMenuPresenter> {
        self.session.action_menu()
    }

    fn engageable(&self) -> Option<&Npc> {
        self.closest()
            .filter(|closest| closest.in_range)
            .map(|closest| closest.npc)
    }

    /// Per-frame tick: proximity scan, hint fade, and session update.
    pub fn update(&mut self, delta_seconds: f32, player_position: Vec2) {
        self.closest = nearest(self.npcs.iter().map(|npc| npc.position), player_position);

        let show_hint = !self.session.is_active() && self.engageable().is_some();
        self.hint.set_target(show_hint);
        self.hint.update(delta_seconds);

        if self.session.state() == SessionState::Idle {
            return;
        }
        let npc_position = self
            .session
            .active_npc()
            .and_then(|id| self.npc(id))
            .map(|npc| npc.position)
            .or_else(|| self.session.npc_position())
            .unwrap_or(player_position);
        self.session
            .update(delta_seconds, player_position, npc_position);
    }

    /// Interact press: opens a session with the engageable NPC, or advances the dialogue.
    pub fn handle_interaction<L, T>(&mut self, player: &mut L, text: &T) -> InteractionResponse
    where
        L: ReputationLedger + ?Sized,
        T: TextResolver + ?Sized,
    {
        match self.session.state() {
            SessionState::Dialogue => self.session.advance(),
            SessionState::ActionMenu => InteractionResponse::Ignored,
            SessionState::Idle | SessionState::Closed => {
                let Some(index) = self
                    .closest
                    .filter(|closest| closest.distance <= self.interaction_range)
                    .map(|closest| closest.index)
                else {
                    return InteractionResponse::Ignored;
                };
                let Some(npc) = self.npcs.get(index) else {
                    return InteractionResponse::Ignored;
                };
                if !self.session.start(npc, text) {
                    return InteractionResponse::Ignored;
                }
                reward_talk(player, self.session.rules());
                InteractionResponse::Started(npc.id)
            }
        }
    }

    pub fn handle_click<L, R>(
        &mut self,
        position: Vec2,
        player: &mut L,
        rng: &mut R,
    ) -> Option<ActionOutcome>
    where
        L: ReputationLedger + ?Sized,
        R: Rng + ?Sized,
    {
        if self.session.state() != SessionState::ActionMenu {
            return None;
        }
        self.session.click(position, player, rng)
    }

    pub fn handle_pointer(&mut self, position: Vec2) {
        if self.session.state() == SessionState::ActionMenu {
            self.session.pointer_moved(position);
        }
    }

    pub fn layout_action_menu(&mut self, layout: &MenuLayout) {
        self.session.layout_menu(layout);
    }

    /// Sessions closed since the last call; each close is returned exactly once.
    pub fn take_closed_sessions(&mut self) -> Vec<ClosedSession> {
        self.session.take_closed()
    }
}
