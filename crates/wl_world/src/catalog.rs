//! Data tables describing every kind of thing the generators can place.
//!
//! Catalogs ship with built-in defaults and can also be loaded from RON.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::entities::{InteractionKind, ItemCategory, VegetationKind};

/// Error type for catalog loading.
#[derive(Debug)]
pub enum CatalogError {
    Ron(ron::error::SpannedError),
}

impl From<ron::error::SpannedError> for CatalogError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Ron(err)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ron(e) => write!(f, "RON parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A wandering animal species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalSpecies {
    pub name: String,
    /// Walking speed in units per second.
    pub max_velocity: f32,
    /// Base sprite width before scaling.
    pub width: f32,
    /// Base sprite height before scaling.
    pub height: f32,
    /// Random size multiplier range.
    pub scale: (f32, f32),
    /// Seconds spent walking before idling.
    pub walk_time: (f32, f32),
    /// Seconds spent idle before walking again.
    pub idle_time: (f32, f32),
    /// How far the animal may stray from its spawn point.
    pub wander_radius: f32,
}

/// Radius every default species wanders within.
pub const DEFAULT_WANDER_RADIUS: f32 = 20.0;

/// Feature counts are rounded to four decimals before flooring.
const TARGET_PRECISION: f64 = 10_000.0;

impl AnimalSpecies {
    fn new(name: &str, max_velocity: f32, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            max_velocity,
            width,
            height,
            scale: (0.9, 1.1),
            walk_time: (2.0, 6.0),
            idle_time: (2.0, 6.0),
            wander_radius: DEFAULT_WANDER_RADIUS,
        }
    }

    fn with_times(mut self, walk_time: (f32, f32), idle_time: (f32, f32)) -> Self {
        self.walk_time = walk_time;
        self.idle_time = idle_time;
        self
    }

    pub fn all_defaults() -> Vec<AnimalSpecies> {
        vec![
            Self::new("Deer", 2.0, 1.4, 1.6).with_times((3.0, 7.0), (2.0, 5.0)),
            Self::new("Boar", 1.6, 1.2, 0.9).with_times((2.0, 5.0), (3.0, 8.0)),
            Self::new("Rabbit", 3.2, 0.4, 0.4).with_times((1.0, 3.0), (1.0, 4.0)),
            Self::new("Fox", 2.6, 0.9, 0.7),
        ]
    }
}

/// One line of a landmark's loot table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Index into the item definitions.
    pub item: usize,
    /// Inclusive range of items to place.
    pub count: (u32, u32),
    /// Inclusive distance range from the landmark.
    pub distance: (f32, f32),
}

impl SpawnEntry {
    pub const fn new(item: usize, count: (u32, u32), distance: (f32, f32)) -> Self {
        Self { item, count, distance }
    }
}

/// A kind of landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticKind {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub scale: (f32, f32),
    /// Items seeded around each landmark of this kind.
    pub loot: SmallVec<[SpawnEntry; 4]>,
}

impl StaticKind {
    pub fn all_defaults() -> Vec<StaticKind> {
        vec![
            StaticKind {
                name: "Ruin".to_string(),
                width: 6.0,
                height: 5.0,
                scale: (0.9, 1.2),
                loot: smallvec![
                    SpawnEntry::new(ItemDefinition::CHEST, (1, 2), (2.0, 5.0)),
                    SpawnEntry::new(ItemDefinition::SWORD, (0, 1), (2.0, 4.0)),
                ],
            },
            StaticKind {
                name: "Campsite".to_string(),
                width: 4.0,
                height: 2.0,
                scale: (0.9, 1.1),
                loot: smallvec![
                    SpawnEntry::new(ItemDefinition::CRATE, (1, 3), (1.5, 4.0)),
                    SpawnEntry::new(ItemDefinition::AXE, (1, 1), (1.0, 3.0)),
                    SpawnEntry::new(ItemDefinition::KNIFE, (0, 2), (1.0, 3.0)),
                ],
            },
            StaticKind {
                name: "Shrine".to_string(),
                width: 2.0,
                height: 4.0,
                scale: (1.0, 1.0),
                loot: smallvec![SpawnEntry::new(ItemDefinition::CHEST, (1, 1), (1.0, 2.0))],
            },
            StaticKind {
                name: "Wagon".to_string(),
                width: 5.0,
                height: 3.0,
                scale: (0.9, 1.1),
                loot: smallvec![
                    SpawnEntry::new(ItemDefinition::BARREL, (1, 3), (2.0, 4.0)),
                    SpawnEntry::new(ItemDefinition::CRATE, (0, 2), (2.0, 5.0)),
                ],
            },
        ]
    }
}

/// How often an item turns up in scattered loot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Relative selection weight.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Common => 60,
            Self::Uncommon => 30,
            Self::Rare => 10,
        }
    }
}

/// Static description of an item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub category: ItemCategory,
    pub interaction: InteractionKind,
    pub width: f32,
    pub height: f32,
    pub rarity: Rarity,
}

impl ItemDefinition {
    pub const CHEST: usize = 0;
    pub const CRATE: usize = 1;
    pub const BARREL: usize = 2;
    pub const AXE: usize = 3;
    pub const KNIFE: usize = 4;
    pub const SWORD: usize = 5;

    fn new(
        name: &str,
        category: ItemCategory,
        width: f32,
        height: f32,
        rarity: Rarity,
    ) -> Self {
        let interaction = match category {
            ItemCategory::Container => InteractionKind::Open,
            ItemCategory::Tool | ItemCategory::Weapon => InteractionKind::Take,
        };
        Self {
            name: name.to_string(),
            category,
            interaction,
            width,
            height,
            rarity,
        }
    }

    /// Default item list, ordered to match the index constants above.
    pub fn all_defaults() -> Vec<ItemDefinition> {
        vec![
            Self::new("Chest", ItemCategory::Container, 1.0, 0.8, Rarity::Uncommon),
            Self::new("Crate", ItemCategory::Container, 0.9, 0.9, Rarity::Common),
            Self::new("Barrel", ItemCategory::Container, 0.7, 1.0, Rarity::Common),
            Self::new("Axe", ItemCategory::Tool, 0.6, 0.6, Rarity::Uncommon),
            Self::new("Knife", ItemCategory::Tool, 0.4, 0.3, Rarity::Common),
            Self::new("Sword", ItemCategory::Weapon, 0.3, 1.0, Rarity::Rare),
        ]
    }
}

/// Placement parameters for one vegetation size tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VegetationProfile {
    /// Fraction of the per-tile feature budget spent on this tier.
    pub density: f32,
    pub width: f32,
    pub height: f32,
    pub scale: (f32, f32),
    /// Whether the player collides with it.
    pub blocks_movement: bool,
}

/// Vegetation profiles indexed by [`VegetationKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationTable {
    profiles: [VegetationProfile; 3],
}

impl Default for VegetationTable {
    fn default() -> Self {
        Self {
            profiles: [
                VegetationProfile {
                    density: 0.5,
                    width: 0.6,
                    height: 0.5,
                    scale: (0.6, 1.4),
                    blocks_movement: false,
                },
                VegetationProfile {
                    density: 0.3,
                    width: 1.2,
                    height: 1.0,
                    scale: (0.6, 1.4),
                    blocks_movement: true,
                },
                VegetationProfile {
                    density: 0.2,
                    width: 2.5,
                    height: 6.0,
                    scale: (0.8, 1.2),
                    blocks_movement: true,
                },
            ],
        }
    }
}

impl VegetationTable {
    pub fn get(&self, kind: VegetationKind) -> &VegetationProfile {
        &self.profiles[kind.index()]
    }

    pub fn get_mut(&mut self, kind: VegetationKind) -> &mut VegetationProfile {
        &mut self.profiles[kind.index()]
    }

    /// Number of features of `kind` for a tile with `budget` features.
    ///
    /// The product is rounded to four decimals before flooring so a density
    /// such as 0.35, which f32 stores just below its written value, still
    /// yields the count it reads as.
    pub fn target_count(&self, kind: VegetationKind, budget: u32) -> usize {
        let density = self.get(kind).density.max(0.0) as f64;
        let product = budget as f64 * density;
        ((product * TARGET_PRECISION).round() / TARGET_PRECISION).floor() as usize
    }
}

/// Every table the generators read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldCatalog {
    pub species: Vec<AnimalSpecies>,
    pub static_kinds: Vec<StaticKind>,
    pub items: Vec<ItemDefinition>,
    pub vegetation: VegetationTable,
}

impl Default for WorldCatalog {
    fn default() -> Self {
        Self {
            species: AnimalSpecies::all_defaults(),
            static_kinds: StaticKind::all_defaults(),
            items: ItemDefinition::all_defaults(),
            vegetation: VegetationTable::default(),
        }
    }
}

impl WorldCatalog {
    /// Parse a catalog from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize the catalog to pretty RON, e.g. to seed a modding file.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new().depth_limit(4))
    }
}
