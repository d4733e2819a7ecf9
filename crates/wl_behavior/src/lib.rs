//! Per-frame behavior of populated entities: animal wandering, foliage
//! cutting, item interaction and vegetation collision.

pub mod collision;
pub mod foliage;
pub mod items;
pub mod wander;

pub use collision::{blocking_vegetation, footprint_radius};
pub use foliage::{cut_foliage, ParticleBurst, ParticleEmitter, CUTTING_RANGE};
pub use items::{open_nearby_items, take_items, INTERACTION_RANGE};
pub use wander::{update_animal, update_animals, STEER_SPREAD};
