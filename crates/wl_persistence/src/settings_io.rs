use std::fs;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wl_core::GameSettings;
use wl_world::WorldCatalog;

/// Default location of the settings file.
///
/// Settings are stored as pretty RON rather than a fixed-size binary record;
/// missing fields are an error and fall back to defaults on load.
pub const SETTINGS_PATH: &str = "settings.ron";

/// Default location of an optional catalog override.
pub const CATALOG_PATH: &str = "assets/catalog.ron";

/// Error type for settings and catalog I/O.
#[derive(Debug)]
pub enum SettingsIoError {
    Io(std::io::Error),
    Ron(ron::Error),
    RonSpanned(ron::error::SpannedError),
}

impl From<std::io::Error> for SettingsIoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for SettingsIoError {
    fn from(err: ron::Error) -> Self {
        Self::Ron(err)
    }
}

impl From<ron::error::SpannedError> for SettingsIoError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonSpanned(err)
    }
}

impl std::fmt::Display for SettingsIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Ron(e) => write!(f, "RON serialization error: {}", e),
            Self::RonSpanned(e) => write!(f, "RON parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Ron(e) => Some(e),
            Self::RonSpanned(e) => Some(e),
        }
    }
}

/// Where the active settings are written back to.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SettingsFile(pub PathBuf);

impl Default for SettingsFile {
    fn default() -> Self {
        Self(PathBuf::from(SETTINGS_PATH))
    }
}

fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), SettingsIoError> {
    let pretty_config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .separate_tuple_members(true);

    let ron_string = ron::ser::to_string_pretty(value, pretty_config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, ron_string)?;
    Ok(())
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsIoError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

/// Save game settings to a RON file.
pub fn save_settings(path: &Path, settings: &GameSettings) -> Result<(), SettingsIoError> {
    write_ron(path, settings)
}

/// Load game settings from a RON file.
pub fn load_settings(path: &Path) -> Result<GameSettings, SettingsIoError> {
    read_ron(path)
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_settings_or_default(path: &Path) -> GameSettings {
    match load_settings(path) {
        Ok(settings) => {
            info!("Loaded settings from {} (seed {})", path.display(), settings.seed);
            settings
        }
        Err(SettingsIoError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("No settings at {}, using defaults", path.display());
            GameSettings::default()
        }
        Err(err) => {
            warn!("Could not read settings from {}: {}. Using defaults", path.display(), err);
            GameSettings::default()
        }
    }
}

pub fn save_catalog(path: &Path, catalog: &WorldCatalog) -> Result<(), SettingsIoError> {
    write_ron(path, catalog)
}

pub fn load_catalog(path: &Path) -> Result<WorldCatalog, SettingsIoError> {
    read_ron(path)
}

/// Load a catalog override if one exists, otherwise the built-in catalog.
pub fn load_catalog_or_default(path: &Path) -> WorldCatalog {
    if !path.exists() {
        return WorldCatalog::default();
    }
    match load_catalog(path) {
        Ok(catalog) => {
            info!(
                "Loaded catalog from {} ({} species, {} landmark kinds, {} items)",
                path.display(),
                catalog.species.len(),
                catalog.static_kinds.len(),
                catalog.items.len()
            );
            catalog
        }
        Err(err) => {
            warn!("Could not read catalog from {}: {}. Using built-in catalog", path.display(), err);
            WorldCatalog::default()
        }
    }
}
