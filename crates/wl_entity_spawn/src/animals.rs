use bevy::log::{info, warn};
use bevy::math::{Vec2, Vec3};
use rand::Rng;
use wl_core::{uniform_between, EntityStore, WorldRng, GROUND_CLEARANCE};
use wl_world::{Animal, AnimalState};

use crate::{reserve, SpawnContext, SpawnReport, SpawnStream};

/// The first animals are lined up near the origin for play-testing.
pub const DEBUG_ROW_ANIMALS: usize = 20;
const DEBUG_ROW_LENGTH: usize = 10;
const DEBUG_ROW_SPACING: f32 = 2.0;
const DEBUG_ROW_GAP: f32 = 5.0;

/// Debug placement: two rows of ten, two units apart, at z = 0 and z = 5.
fn debug_row_position(index: usize) -> Vec2 {
    let column = (index % DEBUG_ROW_LENGTH) as f32;
    let row = (index / DEBUG_ROW_LENGTH) as f32;
    Vec2::new(column * DEBUG_ROW_SPACING, row * DEBUG_ROW_GAP)
}

/// Populate the animal store.
///
/// Species are drawn uniformly from those whose sprites loaded. Each animal
/// starts in a random state with a random timer for that state.
pub fn generate_animals(
    store: &mut EntityStore<Animal>,
    rng: &mut WorldRng,
    ctx: &SpawnContext,
) -> SpawnReport {
    rng.reseed(SpawnStream::Animals.derive(ctx.seed));

    let requested = ctx.config.scaled(ctx.config.animal_count as usize);
    let species = ctx.sprites.loaded_species(ctx.catalog.species.len());
    if species.is_empty() {
        warn!("No animal sprites loaded, skipping {} animals", requested);
        rng.reseed_from_clock();
        return SpawnReport { requested, spawned: 0 };
    }

    let room = reserve(store, requested, "animals");
    let mut spawned = 0;

    for index in 0..room {
        let species_index = species[rng.gen_range(0..species.len())];
        let kind = &ctx.catalog.species[species_index];

        let point = if index < DEBUG_ROW_ANIMALS {
            debug_row_position(index)
        } else {
            ctx.chunk.random_point(rng)
        };
        let scale = uniform_between(rng, kind.scale.0, kind.scale.1);
        let ground = ctx.terrain.height_at(point.x, point.y);
        let position = Vec3::new(point.x, ground + GROUND_CLEARANCE, point.y);
        let facing = rng.gen_range(0.0..360.0);

        let mut animal = Animal {
            position,
            spawn_point: position,
            rotation: facing,
            direction: facing,
            velocity: 0.0,
            max_velocity: kind.max_velocity,
            state: AnimalState::Idle,
            state_timer: 0.0,
            species: species_index,
            width: kind.width * scale,
            height: kind.height * scale,
            wander_radius: kind.wander_radius,
            active: true,
        };
        if rng.gen_bool(0.5) {
            animal.start_walking(kind, rng);
            animal.rotation = animal.direction;
        } else {
            animal.start_idle(kind, rng);
        }

        if store.push(animal).is_err() {
            break;
        }
        spawned += 1;
    }

    rng.reseed_from_clock();
    info!("Spawned {} animals ({} requested)", spawned, requested);

    SpawnReport { requested, spawned }
}
