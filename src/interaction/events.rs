//! Interaction messages broadcast to the HUD and the player log.
use bevy::prelude::{Event, Message};

use crate::npc::components::NpcId;

use super::{resolution::ActionOutcome, session::CloseReason};

/// Fired when the player opens a conversation with an NPC.
#[derive(Event, Message, Debug, Clone)]
pub struct SessionStarted {
    pub npc: NpcId,
    pub name: String,
}

/// Fired after a menu action has been resolved and applied.
#[derive(Event, Message, Debug, Clone)]
pub struct ActionResolved {
    pub npc: NpcId,
    pub outcome: ActionOutcome,
}

/// Fired when a session ends, for whatever reason.
#[derive(Event, Message, Debug, Clone)]
pub struct SessionClosed {
    pub npc: NpcId,
    pub reason: CloseReason,
}
