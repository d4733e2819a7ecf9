//! Seeded world population: vegetation, animals, landmarks and loot.
//!
//! Every generator follows the same shape: reseed the shared stream from the
//! world seed, size the target store up front, place entities uniformly over
//! the chunk, then hand the stream back to a clock-derived seed.

use bevy::log::error;
use wl_core::{Chunk, EntityStore, GameSettings, GroundHeight};
use wl_world::{SpriteRegistry, WorldCatalog};

pub mod animals;
pub mod items;
pub mod statics;
pub mod vegetation;

pub use animals::{generate_animals, DEBUG_ROW_ANIMALS};
pub use items::{generate_scattered_items, spawn_items_around_landmarks};
pub use statics::generate_static_elements;
pub use vegetation::generate_vegetation;

/// Population sizes for one world.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationConfig {
    /// Vegetation budget per chunk, shared between the size tiers.
    pub features_per_tile: u32,
    pub animal_count: u32,
    pub static_count: u32,
    pub scattered_item_count: u32,
    /// Multiplier on loot counts around landmarks.
    pub item_spawn_rate: f32,
    /// Halves vegetation and animal counts.
    pub low_quality: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            features_per_tile: 200,
            animal_count: 40,
            static_count: 12,
            scattered_item_count: 10,
            item_spawn_rate: 1.0,
            low_quality: false,
        }
    }
}

impl PopulationConfig {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            item_spawn_rate: settings.item_spawn_rate,
            low_quality: settings.low_quality(),
            ..Self::default()
        }
    }

    /// Apply the quality setting to a density-driven count.
    pub fn scaled(&self, count: usize) -> usize {
        if self.low_quality {
            count / 2
        } else {
            count
        }
    }
}

/// Everything a generator reads besides the store it fills.
pub struct SpawnContext<'a> {
    pub seed: u32,
    pub chunk: Chunk,
    pub terrain: &'a dyn GroundHeight,
    pub catalog: &'a WorldCatalog,
    pub sprites: &'a SpriteRegistry,
    pub config: &'a PopulationConfig,
}

/// Independent random streams drawn from one world seed, so categories that
/// share a seed do not land on identical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStream {
    Vegetation,
    Animals,
    StaticElements,
    ScatteredItems,
    LandmarkLoot,
}

impl SpawnStream {
    fn salt(&self) -> u32 {
        match self {
            Self::Vegetation => 0x0000_0000,
            Self::Animals => 0x9E37_79B9,
            Self::StaticElements => 0x3C6E_F372,
            Self::ScatteredItems => 0xDAA6_6D2B,
            Self::LandmarkLoot => 0x78DD_E6E4,
        }
    }

    /// Seed for this stream derived from the world seed.
    pub fn derive(&self, seed: u32) -> u32 {
        seed ^ self.salt()
    }
}

/// Outcome of one generator pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub requested: usize,
    pub spawned: usize,
}

impl SpawnReport {
    pub fn skipped(&self) -> usize {
        self.requested.saturating_sub(self.spawned)
    }

    pub fn merge(&mut self, other: SpawnReport) {
        self.requested += other.requested;
        self.spawned += other.spawned;
    }
}

/// Grow `store` for `additional` new entries and return how many fit.
///
/// A refused growth is logged and generation carries on with whatever room
/// the store already has.
pub(crate) fn reserve<T>(store: &mut EntityStore<T>, additional: usize, label: &str) -> usize {
    if let Err(err) = store.ensure_capacity(store.len().saturating_add(additional)) {
        error!("Could not make room for {} {}: {}", additional, label, err);
    }
    additional.min(store.capacity() - store.len())
}
