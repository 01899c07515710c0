//! Key → localized text lookup backed by a JSON table.
use std::{collections::HashMap, fmt, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/localization.toml";
const DEFAULT_TABLE_PATH: &str = "assets/scripts/dialogues.json";

/// Anything that can turn a dialogue key into display text.
pub trait TextResolver {
    fn resolve_text(&self, key: &str) -> String;
}

impl<F> TextResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve_text(&self, key: &str) -> String {
        self(key)
    }
}

/// Column of the translation table to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    fn column(self) -> usize {
        match self {
            Self::English => 0,
            Self::Spanish => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
        }
    }
}

/// Reasons a translation table could not be loaded.
#[derive(Debug)]
pub enum LocalizationError {
    Read { path: String, source: std::io::Error },
    Parse { source: serde_json::Error },
}

impl fmt::Display for LocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "Failed to read {}: {}", path, source),
            Self::Parse { source } => write!(f, "Malformed translation table: {}", source),
        }
    }
}

impl std::error::Error for LocalizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLocalizationConfig {
    language: Language,
    table_path: String,
}

impl Default for RawLocalizationConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            table_path: DEFAULT_TABLE_PATH.to_string(),
        }
    }
}

/// Which language to show and where the table lives.
#[derive(Resource, Debug, Clone)]
pub struct LocalizationSettings {
    pub language: Language,
    pub table_path: String,
}

impl LocalizationSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawLocalizationConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawLocalizationConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawLocalizationConfig::default().into()
            }
        }
    }
}

impl From<RawLocalizationConfig> for LocalizationSettings {
    fn from(value: RawLocalizationConfig) -> Self {
        let table_path = if value.table_path.trim().is_empty() {
            DEFAULT_TABLE_PATH.to_string()
        } else {
            value.table_path.trim().to_string()
        };

        Self {
            language: value.language,
            table_path,
        }
    }
}

/// Translation table: each key maps to one string per language column.
#[derive(Resource, Debug, Clone, Default)]
pub struct LocalizationTable {
    language: Language,
    entries: HashMap<String, Vec<String>>,
}

impl LocalizationTable {
    pub fn from_json_str(data: &str, language: Language) -> Result<Self, LocalizationError> {
        let entries = serde_json::from_str::<HashMap<String, Vec<String>>>(data)
            .map_err(|source| LocalizationError::Parse { source })?;
        Ok(Self { language, entries })
    }

    pub fn from_path(path: impl AsRef<Path>, language: Language) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| LocalizationError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data, language)
    }

    /// Loads the configured table, or an empty one that echoes keys back.
    pub fn load_or_empty(settings: &LocalizationSettings) -> Self {
        match Self::from_path(&settings.table_path, settings.language) {
            Ok(table) => table,
            Err(err) => {
                warn!("{}. Dialogue keys will be shown untranslated.", err);
                Self {
                    language: settings.language,
                    entries: HashMap::new(),
                }
            }
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|columns| columns.get(self.language.column()))
            .map(String::as_str)
    }
}

impl TextResolver for LocalizationTable {
    fn resolve_text(&self, key: &str) -> String {
        match self.get(key) {
            Some(text) => text.to_string(),
            None => {
                warn!(
                    "Translation key '{}' has no {} text",
                    key,
                    self.language.label()
                );
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "merchant-01": ["Welcome to my stall!", "¡Bienvenido a mi puesto!"],
        "harbor-01": ["Mind the ropes."]
    }"#;

    #[test]
    fn resolves_selected_language_column() {
        let english = LocalizationTable::from_json_str(TABLE, Language::English)
            .expect("table should parse");
        assert_eq!(english.len(), 2);
        assert_eq!(english.language(), Language::English);
        assert_eq!(english.resolve_text("merchant-01"), "Welcome to my stall!");

        let spanish = LocalizationTable::from_json_str(TABLE, Language::Spanish)
            .expect("table should parse");
        assert_eq!(spanish.resolve_text("merchant-01"), "¡Bienvenido a mi puesto!");
    }

    #[test]
    fn missing_keys_and_columns_echo_the_key() {
        let table = LocalizationTable::from_json_str(TABLE, Language::Spanish)
            .expect("table should parse");
        assert_eq!(table.resolve_text("harbor-01"), "harbor-01");
        assert_eq!(table.resolve_text("nobody-99"), "nobody-99");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = LocalizationTable::from_json_str("{ not json", Language::English)
            .expect_err("table should be rejected");
        assert!(matches!(error, LocalizationError::Parse { .. }));
        assert!(error.to_string().contains("Malformed"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = LocalizationTable::from_path("does/not/exist.json", Language::English)
            .expect_err("file does not exist");
        assert!(matches!(error, LocalizationError::Read { .. }));
    }

    #[test]
    fn closures_resolve_text() {
        let resolver = |key: &str| key.to_uppercase();
        assert_eq!(resolver.resolve_text("tavern-01"), "TAVERN-01");
    }

    #[test]
    fn settings_fall_back_to_default_table() {
        let raw: RawLocalizationConfig =
            toml::from_str("language = \"spanish\"\ntable_path = \"  \"").expect("valid toml");
        let settings = LocalizationSettings::from(raw);
        assert_eq!(settings.language, Language::Spanish);
        assert_eq!(settings.table_path, DEFAULT_TABLE_PATH);
    }
}
