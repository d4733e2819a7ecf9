use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Boolean toggles carried in the settings record.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SettingsFlags: u8 {
        /// Halve vegetation and animal density.
        const LOW_QUALITY = 0b0000_0001;
        const FOG = 0b0000_0010;
        const SHOW_FPS = 0b0000_0100;
        const INVERT_MOUSE = 0b0000_1000;
    }
}

impl Default for SettingsFlags {
    fn default() -> Self {
        Self::FOG
    }
}

/// Persisted game settings.
///
/// The world seed lives here so reloading a session reproduces the same world.
/// It only changes when a new game is started.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// World seed for procedural generation.
    pub seed: u32,
    /// Quality and display toggles.
    pub flags: SettingsFlags,
    /// Multiplier applied to loot counts around landmarks.
    pub item_spawn_rate: f32,
    /// Real seconds for one full day-night cycle.
    pub day_length_secs: f32,
    pub mouse_sensitivity: f32,
    /// Master volume in `[0, 1]`.
    pub master_volume: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 12345,
            flags: SettingsFlags::default(),
            item_spawn_rate: 1.0,
            day_length_secs: 600.0,
            mouse_sensitivity: 0.15,
            master_volume: 0.8,
        }
    }
}

impl GameSettings {
    pub fn low_quality(&self) -> bool {
        self.flags.contains(SettingsFlags::LOW_QUALITY)
    }

    pub fn set_low_quality(&mut self, enabled: bool) {
        self.flags.set(SettingsFlags::LOW_QUALITY, enabled);
    }

    /// Replace the world seed with a fresh random value. Used when starting a
    /// new game; continuing a saved game keeps the stored seed.
    pub fn roll_new_seed(&mut self) -> u32 {
        self.seed = rand::random();
        self.seed
    }
}
