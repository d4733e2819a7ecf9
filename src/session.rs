//! The live game session: every entity store plus the systems that tick them.

use std::sync::Arc;

use bevy::log::info;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;
use wl_behavior::{
    blocking_vegetation, cut_foliage, open_nearby_items, take_items, update_animals,
    ParticleBurst,
};
use wl_core::{Chunk, EntityStore, GameSettings, GroundHeight, WorldRng};
use wl_entity_spawn::{
    generate_animals, generate_scattered_items, generate_static_elements, generate_vegetation,
    spawn_items_around_landmarks, PopulationConfig, SpawnContext, SpawnReport,
};
use wl_player::PlayerPose;
use wl_sky::{DayNightCycle, LightingParams};
use wl_terrain::NoiseTerrain;
use wl_world::{
    animal_billboards, item_billboards, static_billboards, vegetation_billboards, Animal,
    BillboardView, Item, SpriteRegistry, StaticElement, Vegetation, WorldCatalog,
};

/// Side length of the playable area.
pub const WORLD_SIZE: f32 = 100.0;

/// Radius of the player's collision circle.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Per-category results of one world generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub vegetation: SpawnReport,
    pub animals: SpawnReport,
    pub statics: SpawnReport,
    pub items: SpawnReport,
}

/// Builds the ground for a world seed.
pub type TerrainFactory = Box<dyn Fn(u32) -> Arc<dyn GroundHeight> + Send + Sync>;

/// Noise terrain seeded with the world seed.
pub fn noise_terrain() -> TerrainFactory {
    Box::new(|seed: u32| -> Arc<dyn GroundHeight> { Arc::new(NoiseTerrain::new(seed)) })
}

/// Owner of all world state for the running game.
///
/// Terrain is rebuilt from the seed on every regeneration, so a saved seed
/// reproduces the ground as well as the entities on it.
#[derive(Resource)]
pub struct WorldSession {
    build_terrain: TerrainFactory,
    terrain: Arc<dyn GroundHeight>,
    chunk: Chunk,
    rng: WorldRng,
    catalog: WorldCatalog,
    sprites: SpriteRegistry,
    pub vegetation: EntityStore<Vegetation>,
    pub animals: EntityStore<Animal>,
    pub statics: EntityStore<StaticElement>,
    pub items: EntityStore<Item>,
    pub cycle: DayNightCycle,
    /// Definition indices of everything the player picked up.
    pub inventory: Vec<usize>,
    particles: Vec<ParticleBurst>,
}

impl WorldSession {
    /// A session with no world yet; call [`WorldSession::regenerate`] or
    /// [`WorldSession::new_game`] before playing.
    pub fn new(
        build_terrain: TerrainFactory,
        seed: u32,
        chunk: Chunk,
        catalog: WorldCatalog,
        sprites: SpriteRegistry,
    ) -> Self {
        let terrain = build_terrain(seed);
        Self {
            build_terrain,
            terrain,
            chunk,
            rng: WorldRng::from_clock(),
            catalog,
            sprites,
            vegetation: EntityStore::new(),
            animals: EntityStore::new(),
            statics: EntityStore::new(),
            items: EntityStore::new(),
            cycle: DayNightCycle::default(),
            inventory: Vec::new(),
            particles: Vec::new(),
        }
    }

    pub fn terrain(&self) -> &dyn GroundHeight {
        self.terrain.as_ref()
    }

    pub fn chunk(&self) -> Chunk {
        self.chunk
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    /// Rebuild the whole world from the seed in `settings`.
    ///
    /// The terrain is rebuilt for the seed and stores are emptied first.
    /// Vegetation goes down before animals, landmarks, scattered items and
    /// finally loot around landmarks.
    pub fn regenerate(&mut self, settings: &GameSettings) -> GenerationSummary {
        self.terrain = (self.build_terrain)(settings.seed);
        self.vegetation.reset();
        self.animals.reset();
        self.statics.reset();
        self.items.reset();
        self.particles.clear();
        self.inventory.clear();
        self.cycle = DayNightCycle::new(settings.day_length_secs);

        let config = PopulationConfig::from_settings(settings);
        let ctx = SpawnContext {
            seed: settings.seed,
            chunk: self.chunk,
            terrain: self.terrain.as_ref(),
            catalog: &self.catalog,
            sprites: &self.sprites,
            config: &config,
        };

        let vegetation = generate_vegetation(&mut self.vegetation, &mut self.rng, &ctx);
        let animals = generate_animals(&mut self.animals, &mut self.rng, &ctx);
        let statics = generate_static_elements(&mut self.statics, &mut self.rng, &ctx);
        let mut items = generate_scattered_items(&mut self.items, &mut self.rng, &ctx);
        items.merge(spawn_items_around_landmarks(
            &mut self.items,
            &mut self.statics,
            &mut self.rng,
            &ctx,
        ));

        info!(
            "World {} ready on {}: {} plants, {} animals, {} landmarks, {} items",
            settings.seed,
            self.terrain.name(),
            vegetation.spawned,
            animals.spawned,
            statics.spawned,
            items.spawned
        );

        GenerationSummary {
            vegetation,
            animals,
            statics,
            items,
        }
    }

    /// Start over with a freshly rolled seed.
    pub fn new_game(&mut self, settings: &mut GameSettings) -> GenerationSummary {
        let seed = settings.roll_new_seed();
        info!("Starting new game with seed {}", seed);
        self.regenerate(settings)
    }

    /// One simulation step.
    pub fn tick(&mut self, dt: f32, player: &PlayerPose) {
        update_animals(
            &mut self.animals,
            &self.catalog.species,
            self.terrain.as_ref(),
            &mut self.rng,
            dt,
        );
        open_nearby_items(&mut self.items, &self.catalog.items, player);
        self.cycle.advance(dt);
    }

    pub fn cut_foliage(&mut self, player: &PlayerPose) -> usize {
        cut_foliage(
            &mut self.vegetation,
            player,
            self.sprites.leaf_particle,
            &mut self.particles,
        )
    }

    /// Pick up nearby items into the inventory. Returns what was taken.
    pub fn take_items(&mut self, player: &PlayerPose) -> Vec<usize> {
        let taken = take_items(&mut self.items, &self.catalog.items, player);
        self.inventory.extend_from_slice(&taken);
        taken
    }

    /// Move the player by a planar step unless it leaves the world or runs
    /// into a bush or tree. Returns whether the player moved.
    pub fn try_move_player(&self, player: &mut PlayerPose, step: Vec2) -> bool {
        let target = player.planar_position() + step;
        if !self.chunk.contains(target.x, target.y) {
            return false;
        }
        if blocking_vegetation(&self.vegetation, &self.catalog.vegetation, target, PLAYER_RADIUS)
            .is_some()
        {
            return false;
        }
        player.position.x = target.x;
        player.position.z = target.y;
        player.stand_on(self.terrain.height_at(target.x, target.y));
        true
    }

    /// Put the player on the ground at `point`.
    pub fn place_player(&self, player: &mut PlayerPose, point: Vec2) {
        player.position.x = point.x;
        player.position.z = point.y;
        player.stand_on(self.terrain.height_at(point.x, point.y));
    }

    pub fn lighting(&self) -> LightingParams {
        self.cycle.lighting()
    }

    /// Quads to draw this frame, as seen from `camera`.
    pub fn billboards(&self, camera: Vec3) -> Vec<BillboardView> {
        vegetation_billboards(&self.vegetation, &self.sprites)
            .chain(static_billboards(&self.statics, &self.sprites, camera))
            .chain(item_billboards(&self.items, &self.sprites))
            .chain(animal_billboards(&self.animals, &self.sprites, camera))
            .collect()
    }

    /// Hand pending leaf bursts to the particle system.
    pub fn drain_particles(&mut self) -> Vec<ParticleBurst> {
        std::mem::take(&mut self.particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::FlatGround;
    use wl_world::VegetationKind;

    fn session_on(build_terrain: TerrainFactory, seed: u32) -> WorldSession {
        let catalog = WorldCatalog::default();
        let sprites = SpriteRegistry::placeholder(&catalog, 3);
        WorldSession::new(build_terrain, seed, Chunk::centered(WORLD_SIZE), catalog, sprites)
    }

    fn noise_session(seed: u32) -> WorldSession {
        session_on(noise_terrain(), seed)
    }

    fn flat_session() -> WorldSession {
        session_on(
            Box::new(|_: u32| -> Arc<dyn GroundHeight> { Arc::new(FlatGround::new(0.0)) }),
            0,
        )
    }

    fn positions<T>(store: &EntityStore<T>, position: impl Fn(&T) -> Vec3) -> Vec<Vec3> {
        store.iter().map(position).collect()
    }

    #[test]
    fn same_seed_same_world() {
        let settings = GameSettings::default();
        let mut a = noise_session(settings.seed);
        let mut b = noise_session(settings.seed);
        a.regenerate(&settings);
        b.regenerate(&settings);

        assert_eq!(a.vegetation.as_slice(), b.vegetation.as_slice());
        assert_eq!(a.statics.as_slice(), b.statics.as_slice());
        assert_eq!(a.items.as_slice(), b.items.as_slice());
        assert_eq!(positions(&a.animals, |x| x.position), positions(&b.animals, |x| x.position));
    }

    #[test]
    fn new_game_world_reloads_from_saved_seed() {
        let mut settings = GameSettings::default();
        let mut first = noise_session(settings.seed);
        first.new_game(&mut settings);

        let mut reloaded = noise_session(settings.seed);
        reloaded.regenerate(&settings);

        assert_eq!(first.vegetation.as_slice(), reloaded.vegetation.as_slice());
        assert_eq!(first.statics.as_slice(), reloaded.statics.as_slice());
        assert_eq!(first.items.as_slice(), reloaded.items.as_slice());
        assert_eq!(
            positions(&first.animals, |a| a.position),
            positions(&reloaded.animals, |a| a.position)
        );
        let sample = (7.5, -3.25);
        assert_eq!(
            first.terrain().height_at(sample.0, sample.1),
            reloaded.terrain().height_at(sample.0, sample.1)
        );
    }

    #[test]
    fn regenerate_follows_seed_terrain() {
        let mut session = noise_session(1);
        let mut settings = GameSettings::default();
        settings.seed = 2;
        session.regenerate(&settings);

        let expected = NoiseTerrain::new(2);
        for plant in session.vegetation.iter().take(20) {
            let ground = expected.height_at(plant.position.x, plant.position.z);
            assert!((plant.position.y - (ground + 0.01)).abs() < 1e-5);
        }
    }

    #[test]
    fn regenerate_replaces_stores() {
        let settings = GameSettings::default();
        let mut session = flat_session();
        let first = session.regenerate(&settings);
        let second = session.regenerate(&settings);

        assert_eq!(first, second);
        assert_eq!(session.vegetation.len(), 200);
        assert_eq!(session.animals.len(), 40);
        assert_eq!(session.statics.len(), 12);
        assert_eq!(session.items.len(), second.items.spawned);
        assert!(session.statics.iter().all(|s| s.items_spawned));
    }

    #[test]
    fn new_game_rolls_seed() {
        let mut settings = GameSettings::default();
        let mut session = flat_session();
        session.regenerate(&settings);
        let before = session.vegetation.as_slice().to_vec();

        let mut rolled = settings.seed;
        while rolled == 12345 {
            session.new_game(&mut settings);
            rolled = settings.seed;
        }
        assert_ne!(session.vegetation.as_slice(), before.as_slice());
    }

    #[test]
    fn tick_moves_animals_and_time() {
        let mut session = flat_session();
        session.regenerate(&GameSettings::default());
        let before = positions(&session.animals, |a| a.position);
        let player = PlayerPose::new(Vec3::new(-1000.0, 0.0, -1000.0), 0.0);

        for _ in 0..120 {
            session.tick(1.0 / 30.0, &player);
        }

        assert_ne!(positions(&session.animals, |a| a.position), before);
        assert!((session.cycle.time() - 4.0 / 600.0).abs() < 1e-4);
    }

    #[test]
    fn cutting_queues_particles() {
        let mut session = flat_session();
        session.regenerate(&GameSettings::default());
        let bush = session
            .vegetation
            .iter()
            .find(|p| p.kind == VegetationKind::Medium)
            .unwrap()
            .position;
        let mut player = PlayerPose::default();
        session.place_player(&mut player, Vec2::new(bush.x, bush.z - 1.0));

        let cut = session.cut_foliage(&player);
        assert!(cut >= 1);
        let bursts = session.drain_particles();
        assert_eq!(bursts.len(), cut);
        assert!(bursts.iter().all(|b| b.texture == session.sprites().leaf_particle));
        assert!(session.drain_particles().is_empty());
    }

    #[test]
    fn taking_fills_inventory() {
        let mut session = flat_session();
        session.regenerate(&GameSettings::default());
        let Some(tool) = session
            .items
            .iter()
            .find(|i| i.interaction == wl_world::InteractionKind::Take)
            .cloned()
        else {
            return;
        };
        let mut player = PlayerPose::default();
        session.place_player(&mut player, Vec2::new(tool.position.x, tool.position.z - 0.5));

        let taken = session.take_items(&player);
        assert!(taken.contains(&tool.definition));
        assert_eq!(session.inventory, taken);
    }

    #[test]
    fn player_cannot_walk_through_trees_or_off_the_map() {
        let mut session = flat_session();
        session.vegetation.ensure_capacity(1).unwrap();
        session
            .vegetation
            .push(Vegetation {
                position: Vec3::new(0.0, 0.01, 2.0),
                width: 4.0,
                height: 6.0,
                kind: VegetationKind::Big,
                variant: 0,
                active: true,
            })
            .unwrap();
        let mut player = PlayerPose::default();

        assert!(!session.try_move_player(&mut player, Vec2::new(0.0, 1.0)));
        assert!(session.try_move_player(&mut player, Vec2::new(3.0, 0.0)));
        assert_eq!(player.planar_position(), Vec2::new(3.0, 0.0));
        assert!(!session.try_move_player(&mut player, Vec2::new(WORLD_SIZE, 0.0)));
    }

    #[test]
    fn billboards_cover_active_entities() {
        let mut session = flat_session();
        session.regenerate(&GameSettings::default());
        let expected = session.vegetation.active_count()
            + session.statics.active_count()
            + session.items.active_count()
            + session.animals.active_count();
        assert_eq!(session.billboards(Vec3::new(0.0, 1.7, -60.0)).len(), expected);
        assert_eq!(session.lighting(), LightingParams::DAY);
    }
}
