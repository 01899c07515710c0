//! Startup roster: read from `config/npcs.toml`, or the built-in harbor cast.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{Npc, NpcCategory, NpcId, PortraitRef};

const ROSTER_PATH: &str = "config/npcs.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawRoster {
    #[serde(default)]
    npcs: Vec<RawNpc>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawNpc {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    category: NpcCategory,
    position: [f32; 2],
    #[serde(default)]
    dialogue: Vec<String>,
    #[serde(default)]
    portrait: Option<String>,
}

impl From<RawNpc> for Npc {
    fn from(value: RawNpc) -> Self {
        let id = NpcId::new(value.id);
        let name = value
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_name(value.category, id));
        let npc = Npc::new(id, name, value.category, Vec2::from_array(value.position))
            .with_dialogue_keys(value.dialogue);
        match value.portrait {
            Some(path) => npc.with_portrait(PortraitRef::new(path)),
            None => npc,
        }
    }
}

/// `Merchant-07` style name derived from category and id.
pub fn default_name(category: NpcCategory, id: NpcId) -> String {
    let stem: String = category.label().split_whitespace().collect();
    format!("{}-{:02}", stem, id.value())
}

fn numbered_keys(prefix: &str) -> impl Iterator<Item = String> + '_ {
    (1..=5).map(move |n| format!("{prefix}-{n:02}"))
}

/// The harbor cast used when no roster file is present.
pub fn default_roster() -> Vec<Npc> {
    let cast = [
        (7, NpcCategory::Merchant, Vec2::new(400.0, 300.0), "merchant", "npc/Male1.png"),
        (12, NpcCategory::HarborMaster, Vec2::new(150.0, 240.0), "harbor", "npc/Male3.png"),
        (23, NpcCategory::TavernKeeper, Vec2::new(600.0, 400.0), "tavern", "npc/Female1.png"),
        (31, NpcCategory::WanderingMerchant, Vec2::new(200.0, 500.0), "wanderer", "npc/Male2.png"),
        (44, NpcCategory::Civilian, Vec2::new(680.0, 160.0), "civilian", "npc/Female2.png"),
    ];

    cast.into_iter()
        .map(|(id, category, position, prefix, portrait)| {
            let id = NpcId::new(id);
            Npc::new(id, default_name(category, id), category, position)
                .with_dialogue_keys(numbered_keys(prefix))
                .with_portrait(PortraitRef::new(portrait))
        })
        .collect()
}

/// Loads the roster file, falling back to [`default_roster`] on any failure.
pub fn load_roster() -> Vec<Npc> {
    let path = Path::new(ROSTER_PATH);
    if !path.exists() {
        info!("No {} found; using the built-in harbor roster", ROSTER_PATH);
        return default_roster();
    }

    match fs::read_to_string(path) {
        Ok(data) => match parse_roster(&data) {
            Ok(npcs) if !npcs.is_empty() => npcs,
            Ok(_) => {
                warn!("{} lists no NPCs. Falling back to defaults.", ROSTER_PATH);
                default_roster()
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    ROSTER_PATH, err
                );
                default_roster()
            }
        },
        Err(err) => {
            warn!(
                "Failed to read {} ({}). Falling back to defaults.",
                ROSTER_PATH, err
            );
            default_roster()
        }
    }
}

fn parse_roster(data: &str) -> Result<Vec<Npc>, toml::de::Error> {
    let raw: RawRoster = toml::from_str(data)?;
    Ok(raw.npcs.into_iter().map(Npc::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_the_harbor_merchant() {
        let roster = default_roster();
        assert_eq!(roster.len(), 5);

        let merchant = &roster[0];
        assert_eq!(merchant.display_name, "Merchant-07");
        assert_eq!(merchant.position, Vec2::new(400.0, 300.0));
        assert_eq!(merchant.dialogue_keys.first().map(String::as_str), Some("merchant-01"));
        assert_eq!(merchant.dialogue_keys.last().map(String::as_str), Some("merchant-05"));
        assert_eq!(roster[3].display_name, "WanderingMerchant-31");
    }

    #[test]
    fn parses_roster_rows() {
        let npcs = parse_roster(
            r#"
            [[npcs]]
            id = 3
            category = "tavern_keeper"
            position = [10.0, 20.0]
            dialogue = ["tavern-01"]

            [[npcs]]
            id = 4
            name = "Old Tom"
            category = "civilian"
            position = [0.0, 0.0]
            portrait = "npc/Male4.png"
            "#,
        )
        .expect("valid roster");

        assert_eq!(npcs.len(), 2);
        assert_eq!(npcs[0].display_name, "TavernKeeper-03");
        assert_eq!(npcs[0].dialogue_keys, vec!["tavern-01".to_string()]);
        assert_eq!(npcs[1].display_name, "Old Tom");
        assert!(npcs[1].dialogue_keys.is_empty());
        assert_eq!(
            npcs[1].portrait.as_ref().map(PortraitRef::as_str),
            Some("npc/Male4.png")
        );
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let result = parse_roster(
            r#"
            [[npcs]]
            id = 1
            category = "pirate"
            position = [0.0, 0.0]
            "#,
        );
        assert!(result.is_err());
    }
}
