//! Entity records, data catalogs and the texture registry that world
//! generation and simulation operate on.

pub mod assets;
pub mod catalog;
pub mod entities;
pub mod render;

pub use assets::{DirectionalSprites, ItemTextures, SpriteRegistry, TextureHandle};
pub use catalog::{
    AnimalSpecies, CatalogError, ItemDefinition, Rarity, SpawnEntry, StaticKind,
    VegetationProfile, VegetationTable, WorldCatalog,
};
pub use entities::{
    Animal, AnimalState, InteractionKind, Item, ItemCategory, StaticElement, Vegetation,
    VegetationKind,
};
pub use render::{
    animal_billboards, item_billboards, static_billboards, vegetation_billboards, BillboardView,
};
