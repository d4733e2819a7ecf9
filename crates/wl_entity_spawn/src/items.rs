use std::f32::consts::TAU;

use bevy::log::{info, warn};
use bevy::math::Vec3;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use wl_core::{uniform_between, uniform_count, EntityStore, WorldRng};
use wl_world::{Item, StaticElement};

use crate::{reserve, SpawnContext, SpawnReport, SpawnStream};

/// Scatter loose items over the chunk, picking definitions by rarity.
pub fn generate_scattered_items(
    store: &mut EntityStore<Item>,
    rng: &mut WorldRng,
    ctx: &SpawnContext,
) -> SpawnReport {
    rng.reseed(SpawnStream::ScatteredItems.derive(ctx.seed));

    let requested = ctx.config.scattered_item_count as usize;
    let candidates: Vec<usize> = (0..ctx.catalog.items.len())
        .filter(|&i| ctx.sprites.item_textures(i).is_some())
        .collect();
    let weights = candidates
        .iter()
        .map(|&i| ctx.catalog.items[i].rarity.weight());
    let picker = match WeightedIndex::new(weights) {
        Ok(picker) => picker,
        Err(err) => {
            warn!("No spawnable item definitions ({}), skipping {} items", err, requested);
            rng.reseed_from_clock();
            return SpawnReport { requested, spawned: 0 };
        }
    };

    let room = reserve(store, requested, "items");
    let mut spawned = 0;

    for _ in 0..room {
        let point = ctx.chunk.random_point(rng);
        let index = candidates[picker.sample(rng)];
        let definition = &ctx.catalog.items[index];
        let ground = ctx.terrain.height_at(point.x, point.y);
        let position = Vec3::new(point.x, ground + definition.height * 0.5, point.y);

        if store.push(Item::from_definition(index, definition, position)).is_err() {
            break;
        }
        spawned += 1;
    }

    rng.reseed_from_clock();
    info!("Spawned {} scattered items ({} requested)", spawned, requested);

    SpawnReport { requested, spawned }
}

/// Seed loot around every active landmark that has not been looted yet.
///
/// For each loot-table entry a count is drawn from its range, scaled by the
/// spawn rate (never below the entry minimum), and each item is dropped at a
/// random angle and distance from the landmark. Entries naming an unknown
/// item definition are skipped. Landmarks are flagged so they never seed
/// twice.
pub fn spawn_items_around_landmarks(
    items: &mut EntityStore<Item>,
    landmarks: &mut EntityStore<StaticElement>,
    rng: &mut WorldRng,
    ctx: &SpawnContext,
) -> SpawnReport {
    rng.reseed(SpawnStream::LandmarkLoot.derive(ctx.seed));

    let spawn_rate = ctx.config.item_spawn_rate.max(0.0);
    let mut report = SpawnReport::default();

    for landmark in landmarks.iter_active_mut().filter(|l| !l.items_spawned) {
        let Some(kind) = ctx.catalog.static_kinds.get(landmark.type_index) else {
            warn!("Landmark references unknown kind {}", landmark.type_index);
            landmark.items_spawned = true;
            continue;
        };

        for entry in &kind.loot {
            let Some(definition) = ctx.catalog.items.get(entry.item) else {
                warn!("{} loot table references unknown item {}", kind.name, entry.item);
                continue;
            };
            if ctx.sprites.item_textures(entry.item).is_none() {
                warn!("No textures for {}, skipping {} loot", definition.name, kind.name);
                continue;
            }

            let drawn = uniform_count(rng, entry.count.0, entry.count.1);
            let minimum = entry.count.0.min(entry.count.1);
            let count = ((drawn as f32 * spawn_rate).floor() as u32).max(minimum) as usize;
            let room = reserve(items, count, "loot items");
            report.requested += count;

            for _ in 0..room {
                let angle = rng.gen_range(0.0..TAU);
                let distance = uniform_between(rng, entry.distance.0, entry.distance.1);
                let x = landmark.position.x + angle.cos() * distance;
                let z = landmark.position.z + angle.sin() * distance;
                let y = ctx.terrain.height_at(x, z) + definition.height * 0.5;

                let item = Item::from_definition(entry.item, definition, Vec3::new(x, y, z));
                if items.push(item).is_err() {
                    break;
                }
                report.spawned += 1;
            }
        }

        landmark.items_spawned = true;
    }

    rng.reseed_from_clock();
    info!(
        "Spawned {} loot items around landmarks ({} requested)",
        report.spawned, report.requested
    );

    report
}
