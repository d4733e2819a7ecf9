//! Foundational types shared by every Wanderlands crate: the seeded random
//! stream, the capacity-managed entity store, terrain sampling, directional
//! sprite math and the persisted settings record.

pub mod coords;
pub mod rng;
pub mod settings;
pub mod sprite;
pub mod store;
pub mod terrain;

pub use coords::{heading_towards, heading_vector, normalize_degrees, planar, Chunk};
pub use rng::{uniform_between, uniform_count, WorldRng};
pub use settings::{GameSettings, SettingsFlags};
pub use sprite::{billboard_corners, sprite_direction, viewing_angle, SPRITE_DIRECTIONS};
pub use store::{EntityStore, Slot, StoreError, INITIAL_CAPACITY};
pub use terrain::{FlatGround, GroundHeight, GROUND_CLEARANCE};
