use std::path::PathBuf;

use bevy::log::error;
use bevy::prelude::*;
use wl_core::GameSettings;

pub mod settings_io;

pub use settings_io::{
    load_catalog, load_catalog_or_default, load_settings, load_settings_or_default, save_catalog,
    save_settings, SettingsFile, SettingsIoError, CATALOG_PATH, SETTINGS_PATH,
};

/// Persistence plugin for Wanderlands.
/// Loads `GameSettings` from RON at startup, writes them back whenever they
/// differ from what is on disk, and once more when the app exits.
pub struct WlPersistencePlugin {
    pub settings_path: PathBuf,
}

impl Default for WlPersistencePlugin {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(SETTINGS_PATH),
        }
    }
}

/// Settings as last read from or written to the settings file.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SavedSettings(pub GameSettings);

impl Plugin for WlPersistencePlugin {
    fn build(&self, app: &mut App) {
        let settings = load_settings_or_default(&self.settings_path);
        app.insert_resource(SavedSettings(settings.clone()))
            .insert_resource(settings)
            .insert_resource(SettingsFile(self.settings_path.clone()))
            .add_systems(Last, (save_changed_settings, save_settings_on_exit).chain());
    }
}

fn write_settings(file: &SettingsFile, settings: &GameSettings, saved: &mut SavedSettings) {
    match save_settings(&file.0, settings) {
        Ok(()) => saved.0 = settings.clone(),
        Err(err) => error!("Failed to save settings to {}: {}", file.0.display(), err),
    }
}

fn save_changed_settings(
    settings: Res<GameSettings>,
    file: Res<SettingsFile>,
    mut saved: ResMut<SavedSettings>,
) {
    if !settings.is_changed() || saved.0 == *settings {
        return;
    }
    write_settings(&file, &settings, &mut saved);
}

fn save_settings_on_exit(
    mut exits: EventReader<AppExit>,
    settings: Res<GameSettings>,
    file: Res<SettingsFile>,
    mut saved: ResMut<SavedSettings>,
) {
    if exits.read().last().is_none() {
        return;
    }
    write_settings(&file, &settings, &mut saved);
}
