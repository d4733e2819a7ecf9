use bevy::log::debug;
use rand::Rng;
use wl_core::{
    heading_towards, heading_vector, normalize_degrees, planar, uniform_between, EntityStore,
    GroundHeight, GROUND_CLEARANCE,
};
use wl_world::{Animal, AnimalSpecies, AnimalState};

/// Random spread in degrees around the heading back to the spawn point.
pub const STEER_SPREAD: f32 = 45.0;

/// Advance every active animal by `dt` seconds. Returns how many changed state.
pub fn update_animals(
    store: &mut EntityStore<Animal>,
    species: &[AnimalSpecies],
    terrain: &dyn GroundHeight,
    rng: &mut impl Rng,
    dt: f32,
) -> usize {
    let mut transitions = 0;
    for animal in store.iter_active_mut() {
        let Some(kind) = species.get(animal.species) else {
            continue;
        };
        if update_animal(animal, kind, terrain, rng, dt) {
            transitions += 1;
        }
    }
    transitions
}

/// One wander step for a single animal.
///
/// A walking animal moves along its heading and stays on the ground. A step
/// that would leave the wander radius is undone and the animal turns back
/// towards its spawn point with some random spread. The state timer runs
/// after movement; when it expires the opposite state is armed at once.
/// Returns true when the state changed.
pub fn update_animal(
    animal: &mut Animal,
    species: &AnimalSpecies,
    terrain: &dyn GroundHeight,
    rng: &mut impl Rng,
    dt: f32,
) -> bool {
    if animal.is_walking() {
        let previous = animal.position;
        let step = heading_vector(animal.direction) * animal.velocity * dt;
        animal.position.x += step.x;
        animal.position.z += step.y;
        animal.position.y =
            terrain.height_at(animal.position.x, animal.position.z) + GROUND_CLEARANCE;
        animal.rotation = animal.direction;

        let offset = planar(animal.position) - planar(animal.spawn_point);
        if offset.length_squared() > animal.wander_radius * animal.wander_radius {
            animal.position = previous;
            let home = heading_towards(planar(animal.position), planar(animal.spawn_point));
            animal.direction =
                normalize_degrees(home + uniform_between(rng, -STEER_SPREAD, STEER_SPREAD));
            animal.rotation = animal.direction;
        }
    }

    animal.state_timer -= dt;
    if animal.state_timer > 0.0 {
        return false;
    }

    match animal.state {
        AnimalState::Walking => animal.start_idle(species, rng),
        AnimalState::Idle => animal.start_walking(species, rng),
    }
    debug!(
        "{} switched to {} for {:.1}s",
        species.name,
        animal.state.name(),
        animal.state_timer
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wl_core::FlatGround;

    fn walker(species: &AnimalSpecies) -> Animal {
        Animal {
            position: Vec3::new(3.0, 0.01, -2.0),
            spawn_point: Vec3::new(3.0, 0.01, -2.0),
            rotation: 0.0,
            direction: 0.0,
            velocity: species.max_velocity,
            max_velocity: species.max_velocity,
            state: AnimalState::Walking,
            state_timer: 100.0,
            species: 0,
            width: species.width,
            height: species.height,
            wander_radius: 5.0,
            active: true,
        }
    }

    #[test]
    fn walking_moves_along_heading() {
        let species = AnimalSpecies::all_defaults().remove(0);
        let ground = FlatGround::new(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut animal = walker(&species);
        animal.direction = 90.0;

        update_animal(&mut animal, &species, &ground, &mut rng, 0.5);

        let expected_x = 3.0 + species.max_velocity * 0.5;
        assert!((animal.position.x - expected_x).abs() < 1e-4);
        assert!((animal.position.z + 2.0).abs() < 1e-4);
        assert_eq!(animal.position.y, 1.0 + GROUND_CLEARANCE);
        assert_eq!(animal.rotation, 90.0);
        assert!((animal.state_timer - 99.5).abs() < 1e-4);
    }

    #[test]
    fn idle_animals_stay_put() {
        let species = AnimalSpecies::all_defaults().remove(0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut animal = walker(&species);
        animal.start_idle(&species, &mut rng);
        let before = animal.position;
        update_animal(&mut animal, &species, &FlatGround::new(0.0), &mut rng, 0.1);
        assert_eq!(animal.position, before);
    }

    #[test]
    fn wandering_never_leaves_radius() {
        let species = AnimalSpecies::all_defaults().remove(2);
        let ground = FlatGround::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut store = EntityStore::new();
        store.ensure_capacity(8).unwrap();
        for i in 0..8 {
            let mut animal = walker(&species);
            animal.direction = i as f32 * 45.0;
            store.push(animal).unwrap();
        }

        for _ in 0..20_000 {
            update_animals(&mut store, &[species.clone()], &ground, &mut rng, 1.0 / 30.0);
            for animal in store.iter() {
                let distance = (planar(animal.position) - planar(animal.spawn_point)).length();
                assert!(distance <= animal.wander_radius + 1e-4, "strayed {}", distance);
            }
        }
    }

    #[test]
    fn boundary_hit_turns_back_home() {
        let species = AnimalSpecies::all_defaults().remove(0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut animal = walker(&species);
        animal.position.z += 4.99;
        animal.direction = 0.0;
        let before = animal.position;

        update_animal(&mut animal, &species, &FlatGround::new(0.0), &mut rng, 1.0);

        assert_eq!(animal.position, before);
        // Home lies straight down -z, heading 180.
        assert!(animal.direction >= 135.0 && animal.direction <= 225.0, "{}", animal.direction);
        assert_eq!(animal.rotation, animal.direction);
    }

    #[test]
    fn expired_timer_switches_state() {
        let species = AnimalSpecies::all_defaults().remove(0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut animal = walker(&species);
        animal.state_timer = 0.05;

        assert!(update_animal(&mut animal, &species, &FlatGround::new(0.0), &mut rng, 0.1));
        assert_eq!(animal.state, AnimalState::Idle);
        assert_eq!(animal.velocity, 0.0);
        assert!(animal.state_timer >= species.idle_time.0);

        animal.state_timer = 0.0;
        assert!(update_animal(&mut animal, &species, &FlatGround::new(0.0), &mut rng, 0.1));
        assert!(animal.is_walking());
        assert_eq!(animal.velocity, animal.max_velocity);
    }

    #[test]
    fn inactive_and_unknown_species_are_skipped() {
        let species = AnimalSpecies::all_defaults().remove(0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut store = EntityStore::new();
        store.ensure_capacity(2).unwrap();
        let mut hidden = walker(&species);
        hidden.active = false;
        let mut stray = walker(&species);
        stray.species = 42;
        store.push(hidden).unwrap();
        store.push(stray).unwrap();

        update_animals(&mut store, &[species], &FlatGround::new(0.0), &mut rng, 1.0);
        for animal in store.iter() {
            assert_eq!(animal.position, Vec3::new(3.0, 0.01, -2.0));
        }
    }
}
