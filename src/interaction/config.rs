use std::{collections::BTreeMap, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::npc::components::NpcCategory;

use super::catalog::{ActionKind, InteractionCatalog};

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    interaction: RawRangeSection,
    #[serde(default)]
    dialogue: RawDialogueSection,
    #[serde(default)]
    hint: RawHintSection,
    #[serde(default)]
    reputation: RawReputationSection,
    #[serde(default)]
    catalog: BTreeMap<String, Vec<ActionKind>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRangeSection {
    range: f32,
}

impl Default for RawRangeSection {
    fn default() -> Self {
        Self { range: 100.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDialogueSection {
    chars_per_second: f32,
    fade_rate: f32,
}

impl Default for RawDialogueSection {
    fn default() -> Self {
        Self {
            chars_per_second: 50.0,
            fade_rate: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHintSection {
    fade_rate: f32,
}

impl Default for RawHintSection {
    fn default() -> Self {
        Self { fade_rate: 3.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawReputationSection {
    talk: i32,
    trade: i32,
    steal_success: i32,
    steal_failure: i32,
    steal_chance_cap: f64,
    steal_divisor: f64,
}

impl Default for RawReputationSection {
    fn default() -> Self {
        Self {
            talk: 1,
            trade: 1,
            steal_success: -10,
            steal_failure: -20,
            steal_chance_cap: 0.5,
            steal_divisor: 200.0,
        }
    }
}

/// Reputation deltas and steal odds applied by action resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ReputationRules {
    pub talk: i32,
    pub trade: i32,
    pub steal_success: i32,
    pub steal_failure: i32,
    pub steal_chance_cap: f64,
    pub steal_divisor: f64,
}

impl Default for ReputationRules {
    fn default() -> Self {
        RawReputationSection::default().into()
    }
}

impl From<RawReputationSection> for ReputationRules {
    fn from(value: RawReputationSection) -> Self {
        Self {
            talk: value.talk,
            trade: value.trade,
            steal_success: value.steal_success,
            steal_failure: value.steal_failure,
            steal_chance_cap: value.steal_chance_cap.clamp(0.0, 1.0),
            steal_divisor: value.steal_divisor.max(1.0),
        }
    }
}

/// Tunable parameters for proximity, presentation speed, and outcomes.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InteractionSettings {
    /// Maximum player–NPC distance (world units) to start or keep a session.
    pub interaction_range: f32,
    pub chars_per_second: f32,
    pub dialogue_fade_rate: f32,
    pub hint_fade_rate: f32,
    pub reputation: ReputationRules,
    pub catalog: InteractionCatalog,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawInteractionConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawInteractionConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let mut catalog = InteractionCatalog::default();
        for (key, actions) in value.catalog {
            match NpcCategory::from_key(&key) {
                Some(category) => catalog.set_actions(category, actions),
                None => warn!("Ignoring catalog entry for unknown NPC category '{}'", key),
            }
        }

        Self {
            interaction_range: value.interaction.range.max(0.0),
            chars_per_second: value.dialogue.chars_per_second.max(1.0),
            dialogue_fade_rate: value.dialogue.fade_rate.max(0.0),
            hint_fade_rate: value.hint.fade_rate.max(0.0),
            reputation: value.reputation.into(),
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_falls_back_to_defaults() {
        let settings = InteractionSettings::default();
        assert_eq!(settings.interaction_range, 100.0);
        assert_eq!(settings.chars_per_second, 50.0);
        assert_eq!(settings.reputation.talk, 1);
        assert_eq!(settings.reputation.steal_chance_cap, 0.5);
        assert_eq!(settings.catalog, InteractionCatalog::default());
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let raw: RawInteractionConfig = toml::from_str(
            r#"
            [interaction]
            range = 64.0

            [reputation]
            steal_chance_cap = 4.0

            [catalog]
            tavern_keeper = ["buy"]
            lighthouse_keeper = ["sell"]
            "#,
        )
        .expect("valid toml");
        let settings = InteractionSettings::from(raw);

        assert_eq!(settings.interaction_range, 64.0);
        assert_eq!(settings.hint_fade_rate, 3.0);
        assert_eq!(settings.reputation.steal_chance_cap, 1.0);
        assert_eq!(settings.reputation.steal_failure, -20);
        assert_eq!(
            settings.catalog.actions_for(NpcCategory::TavernKeeper),
            &[ActionKind::Buy]
        );
        assert_eq!(
            settings.catalog.actions_for(NpcCategory::Civilian),
            &[ActionKind::Steal]
        );
    }
}
