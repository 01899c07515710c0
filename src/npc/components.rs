//! NPC identity data and categories.
use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

/// Unique identifier for an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct NpcId(u64);

impl NpcId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NPC-{:04}", self.0)
    }
}

/// Social role of an NPC. Only the interaction catalog gives it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcCategory {
    Civilian,
    Merchant,
    HarborMaster,
    TavernKeeper,
    WanderingMerchant,
}

impl NpcCategory {
    /// Parses the snake_case key used in config files.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "civilian" => Some(Self::Civilian),
            "merchant" => Some(Self::Merchant),
            "harbor_master" => Some(Self::HarborMaster),
            "tavern_keeper" => Some(Self::TavernKeeper),
            "wandering_merchant" => Some(Self::WanderingMerchant),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Civilian => "Civilian",
            Self::Merchant => "Merchant",
            Self::HarborMaster => "Harbor Master",
            Self::TavernKeeper => "Tavern Keeper",
            Self::WanderingMerchant => "Wandering Merchant",
        }
    }
}

impl fmt::Display for NpcCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque handle to an NPC portrait; only the dialogue box ever shows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortraitRef(String);

impl PortraitRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Static social data for one NPC.
#[derive(Debug, Clone)]
pub struct Npc {
    pub id: NpcId,
    pub display_name: String,
    pub category: NpcCategory,
    pub position: Vec2,
    pub dialogue_keys: Vec<String>,
    pub portrait: Option<PortraitRef>,
}

impl Npc {
    pub fn new(
        id: NpcId,
        display_name: impl Into<String>,
        category: NpcCategory,
        position: Vec2,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            category,
            position,
            dialogue_keys: Vec::new(),
            portrait: None,
        }
    }

    pub fn with_dialogue_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dialogue_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_portrait(mut self, portrait: PortraitRef) -> Self {
        self.portrait = Some(portrait);
        self
    }
}

/// Links a rendered NPC sprite back to its roster entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct NpcVisual {
    pub id: NpcId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_padded() {
        assert_eq!(NpcId::new(7).to_string(), "NPC-0007");
        assert_eq!(NpcId::new(12).value(), 12);
    }

    #[test]
    fn categories_deserialize_from_snake_case() {
        #[derive(Deserialize)]
        struct Row {
            category: NpcCategory,
        }

        let row: Row = toml::from_str("category = \"harbor_master\"").expect("valid category");
        assert_eq!(row.category, NpcCategory::HarborMaster);
        assert_eq!(row.category.to_string(), "Harbor Master");
        assert_eq!(
            NpcCategory::from_key("wandering_merchant"),
            Some(NpcCategory::WanderingMerchant)
        );
        assert_eq!(NpcCategory::from_key("lighthouse_keeper"), None);
    }
}
