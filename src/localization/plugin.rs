//! Localization plugin loading the translation table resource.
use bevy::prelude::*;

use super::table::{LocalizationSettings, LocalizationTable};

pub struct LocalizationPlugin;

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        let settings = LocalizationSettings::load_or_default();
        let table = LocalizationTable::load_or_empty(&settings);
        if table.is_empty() {
            warn!(
                "Localization table {} is empty; dialogue keys will show as-is",
                settings.table_path
            );
        } else {
            info!(
                "Localization loaded {} keys from {} ({})",
                table.len(),
                settings.table_path,
                table.language().label()
            );
        }

        app.insert_resource(settings).insert_resource(table);
    }
}
