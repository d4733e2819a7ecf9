use bevy::log::{info, warn};
use bevy::math::Vec3;
use rand::Rng;
use wl_core::{uniform_between, EntityStore, WorldRng, GROUND_CLEARANCE};
use wl_world::StaticElement;

use crate::{reserve, SpawnContext, SpawnReport, SpawnStream};

/// Place landmarks with a random kind and a fixed random facing.
///
/// Landmark count is not affected by the quality setting.
pub fn generate_static_elements(
    store: &mut EntityStore<StaticElement>,
    rng: &mut WorldRng,
    ctx: &SpawnContext,
) -> SpawnReport {
    rng.reseed(SpawnStream::StaticElements.derive(ctx.seed));

    let requested = ctx.config.static_count as usize;
    let kinds = ctx.sprites.loaded_static_kinds(ctx.catalog.static_kinds.len());
    if kinds.is_empty() {
        warn!("No landmark sprites loaded, skipping {} landmarks", requested);
        rng.reseed_from_clock();
        return SpawnReport { requested, spawned: 0 };
    }

    let room = reserve(store, requested, "landmarks");
    let mut spawned = 0;

    for _ in 0..room {
        let point = ctx.chunk.random_point(rng);
        let type_index = kinds[rng.gen_range(0..kinds.len())];
        let kind = &ctx.catalog.static_kinds[type_index];
        let scale = uniform_between(rng, kind.scale.0, kind.scale.1);
        let rotation = rng.gen_range(0.0..360.0);
        let ground = ctx.terrain.height_at(point.x, point.y);

        let element = StaticElement {
            position: Vec3::new(point.x, ground + GROUND_CLEARANCE, point.y),
            rotation,
            width: kind.width * scale,
            height: kind.height * scale,
            type_index,
            active: true,
            items_spawned: false,
        };
        if store.push(element).is_err() {
            break;
        }
        spawned += 1;
    }

    rng.reseed_from_clock();
    info!("Spawned {} landmarks ({} requested)", spawned, requested);

    SpawnReport { requested, spawned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use wl_core::Chunk;

    #[test]
    fn landmarks_are_deterministic_and_inside_the_chunk() {
        let fixture = Fixture::new();
        let mut a = EntityStore::new();
        let mut b = EntityStore::new();
        generate_static_elements(&mut a, &mut WorldRng::from_clock(), &fixture.context(31, 60.0));
        generate_static_elements(&mut b, &mut WorldRng::from_clock(), &fixture.context(31, 60.0));

        assert_eq!(a.len(), 12);
        assert_eq!(a.as_slice(), b.as_slice());
        for element in a.iter() {
            assert!(Chunk::centered(60.0).contains(element.position.x, element.position.z));
            assert!(!element.items_spawned);
            assert!((0.0..360.0).contains(&element.rotation));
        }
    }

    #[test]
    fn quality_does_not_thin_landmarks() {
        let mut fixture = Fixture::new();
        fixture.config.low_quality = true;
        let mut store = EntityStore::new();
        let report =
            generate_static_elements(&mut store, &mut WorldRng::from_clock(), &fixture.context(31, 60.0));
        assert_eq!(report.spawned, 12);
    }

    #[test]
    fn landmarks_do_not_share_vegetation_positions() {
        let fixture = Fixture::new();
        let ctx = fixture.context(31, 60.0);
        let mut plants = EntityStore::new();
        let mut landmarks = EntityStore::new();
        crate::generate_vegetation(&mut plants, &mut WorldRng::from_clock(), &ctx);
        generate_static_elements(&mut landmarks, &mut WorldRng::from_clock(), &ctx);
        let first_plant = plants.get(0).unwrap().position;
        let first_landmark = landmarks.get(0).unwrap().position;
        assert_ne!(first_plant, first_landmark);
    }
}
