use bevy::log::{info, warn};
use bevy::math::Vec3;
use rand::Rng;
use wl_core::{uniform_between, EntityStore, WorldRng, GROUND_CLEARANCE};
use wl_world::{Vegetation, VegetationKind};

use crate::{reserve, SpawnContext, SpawnReport, SpawnStream};

/// Scatter grass, bushes and trees over the chunk.
///
/// Each size tier gets `floor(features_per_tile * density)` features (halved
/// on low quality). Tiers with no loaded texture variant are skipped.
pub fn generate_vegetation(
    store: &mut EntityStore<Vegetation>,
    rng: &mut WorldRng,
    ctx: &SpawnContext,
) -> SpawnReport {
    rng.reseed(SpawnStream::Vegetation.derive(ctx.seed));

    let table = &ctx.catalog.vegetation;
    let mut plan = Vec::with_capacity(VegetationKind::ALL.len());
    let mut requested = 0;
    for kind in VegetationKind::ALL {
        let target = ctx
            .config
            .scaled(table.target_count(kind, ctx.config.features_per_tile));
        requested += target;

        let variants = ctx.sprites.loaded_vegetation_variants(kind);
        if variants.is_empty() {
            if target > 0 {
                warn!("No {} vegetation textures loaded, skipping {} features", kind.name(), target);
            }
            continue;
        }
        plan.push((kind, target, variants));
    }

    let wanted: usize = plan.iter().map(|(_, target, _)| *target).sum();
    let mut room = reserve(store, wanted, "vegetation features");
    let mut spawned = 0;

    'tiers: for (kind, target, variants) in &plan {
        let profile = table.get(*kind);
        for _ in 0..*target {
            if room == 0 {
                break 'tiers;
            }

            let point = ctx.chunk.random_point(rng);
            let variant = variants[rng.gen_range(0..variants.len())];
            let scale = uniform_between(rng, profile.scale.0, profile.scale.1);
            let ground = ctx.terrain.height_at(point.x, point.y);

            let plant = Vegetation {
                position: Vec3::new(point.x, ground + GROUND_CLEARANCE, point.y),
                width: profile.width * scale,
                height: profile.height * scale,
                kind: *kind,
                variant,
                active: true,
            };
            if store.push(plant).is_err() {
                break 'tiers;
            }
            room -= 1;
            spawned += 1;
        }
    }

    rng.reseed_from_clock();
    info!("Spawned {} vegetation features ({} requested)", spawned, requested);

    SpawnReport { requested, spawned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use wl_core::{Chunk, GroundHeight};
    use wl_terrain::NoiseTerrain;
    use wl_world::TextureHandle;

    fn count_kind(store: &EntityStore<Vegetation>, kind: VegetationKind) -> usize {
        store.iter().filter(|v| v.kind == kind).count()
    }

    #[test]
    fn seed_12345_scenario_counts() {
        let fixture = Fixture::new();
        let terrain = NoiseTerrain::new(12345);
        let ctx = SpawnContext {
            terrain: &terrain,
            ..fixture.context(12345, 50.0)
        };
        let mut store = EntityStore::new();
        let mut rng = WorldRng::from_clock();

        let report = generate_vegetation(&mut store, &mut rng, &ctx);

        assert_eq!(count_kind(&store, VegetationKind::Small), 100);
        assert_eq!(count_kind(&store, VegetationKind::Medium), 60);
        assert_eq!(count_kind(&store, VegetationKind::Big), 40);
        assert_eq!(report, SpawnReport { requested: 200, spawned: 200 });
        for plant in store.iter() {
            assert!(plant.active);
            let ground = terrain.height_at(plant.position.x, plant.position.z);
            assert_eq!(plant.position.y, ground + GROUND_CLEARANCE);
            assert!(Chunk::centered(50.0).contains(plant.position.x, plant.position.z));
        }
    }

    #[test]
    fn same_seed_same_vegetation() {
        let fixture = Fixture::new();
        let ctx = fixture.context(777, 80.0);

        let mut first = EntityStore::new();
        let mut second = EntityStore::new();
        generate_vegetation(&mut first, &mut WorldRng::from_clock(), &ctx);
        generate_vegetation(&mut second, &mut WorldRng::from_clock(), &ctx);

        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn different_seeds_move_vegetation() {
        let fixture = Fixture::new();
        let mut first = EntityStore::new();
        let mut second = EntityStore::new();
        generate_vegetation(&mut first, &mut WorldRng::from_clock(), &fixture.context(1, 80.0));
        generate_vegetation(&mut second, &mut WorldRng::from_clock(), &fixture.context(2, 80.0));
        assert_ne!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn generator_restores_clock_seed() {
        let fixture = Fixture::new();
        let mut store = EntityStore::new();
        let mut rng = WorldRng::from_seed(5);
        generate_vegetation(&mut store, &mut rng, &fixture.context(5, 50.0));
        assert_eq!(rng.seed(), None);
    }

    #[test]
    fn low_quality_halves_every_tier() {
        let mut fixture = Fixture::new();
        fixture.config.low_quality = true;
        let mut store = EntityStore::new();
        generate_vegetation(&mut store, &mut WorldRng::from_clock(), &fixture.context(3, 50.0));
        assert_eq!(count_kind(&store, VegetationKind::Small), 50);
        assert_eq!(count_kind(&store, VegetationKind::Medium), 30);
        assert_eq!(count_kind(&store, VegetationKind::Big), 20);
    }

    #[test]
    fn unloaded_tier_is_skipped() {
        let mut fixture = Fixture::new();
        fixture.sprites.vegetation[VegetationKind::Big.index()] = vec![TextureHandle::NONE];
        let mut store = EntityStore::new();
        let report =
            generate_vegetation(&mut store, &mut WorldRng::from_clock(), &fixture.context(3, 50.0));
        assert_eq!(count_kind(&store, VegetationKind::Big), 0);
        assert_eq!(report.spawned, 160);
        assert_eq!(report.skipped(), 40);
    }

    #[test]
    fn sizes_follow_profile_scale_range() {
        let fixture = Fixture::new();
        let mut store = EntityStore::new();
        generate_vegetation(&mut store, &mut WorldRng::from_clock(), &fixture.context(9, 50.0));
        for plant in store.iter() {
            let profile = fixture.catalog.vegetation.get(plant.kind);
            let scale = plant.width / profile.width;
            assert!(scale >= profile.scale.0 - 1e-4 && scale <= profile.scale.1 + 1e-4);
            assert!(plant.variant < 3);
        }
    }
}
