//! Category → available action table.
use std::{collections::HashMap, fmt};

use bevy::prelude::*;
use serde::Deserialize;

use crate::npc::components::NpcCategory;

/// Things the player can do with an NPC.
///
/// `Talk` is the dialogue phase itself and never appears in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Talk,
    Buy,
    Sell,
    Steal,
}

impl ActionKind {
    /// Every kind that can appear as a menu row. Bounds the menu length.
    pub const MENU_KINDS: [ActionKind; 3] = [Self::Buy, Self::Sell, Self::Steal];

    pub fn label(self) -> &'static str {
        match self {
            Self::Talk => "Talk",
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Steal => "Steal",
        }
    }

    /// Accent colour used by the action menu.
    pub fn color(self) -> Color {
        match self {
            Self::Talk => Color::srgb_u8(64, 196, 255),
            Self::Buy => Color::srgb_u8(96, 255, 96),
            Self::Sell => Color::srgb_u8(255, 196, 64),
            Self::Steal => Color::srgb_u8(255, 64, 64),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const DEFAULT_TABLE: [(NpcCategory, &[ActionKind]); 5] = [
    (NpcCategory::Civilian, &[ActionKind::Steal]),
    (
        NpcCategory::Merchant,
        &[ActionKind::Buy, ActionKind::Sell, ActionKind::Steal],
    ),
    (
        NpcCategory::HarborMaster,
        &[ActionKind::Buy, ActionKind::Steal],
    ),
    (NpcCategory::TavernKeeper, &[ActionKind::Buy, ActionKind::Sell]),
    (
        NpcCategory::WanderingMerchant,
        &[ActionKind::Buy, ActionKind::Sell, ActionKind::Steal],
    ),
];

/// The single place that maps an NPC category to behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionCatalog {
    entries: HashMap<NpcCategory, Vec<ActionKind>>,
}

impl InteractionCatalog {
    /// A catalog that offers nothing to anyone.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replaces the action list for one category. Kinds outside
    /// [`ActionKind::MENU_KINDS`] (that is, `Talk`) and repeats are dropped.
    pub fn set_actions(&mut self, category: NpcCategory, actions: Vec<ActionKind>) {
        let mut menu_actions: Vec<ActionKind> = Vec::with_capacity(actions.len());
        for action in actions {
            if ActionKind::MENU_KINDS.contains(&action) && !menu_actions.contains(&action) {
                menu_actions.push(action);
            }
        }
        self.entries.insert(category, menu_actions);
    }

    /// Ordered menu actions for a category; empty when the category is unknown.
    pub fn actions_for(&self, category: NpcCategory) -> &[ActionKind] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for InteractionCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        for (category, actions) in DEFAULT_TABLE {
            catalog.set_actions(category, actions.to_vec());
        }
        catalog
    }
}
