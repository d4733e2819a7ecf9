use bevy::math::Vec2;
use wl_core::{planar, EntityStore};
use wl_world::{Vegetation, VegetationTable};

/// Solid radius of a plant, a quarter of its drawn width.
pub fn footprint_radius(plant: &Vegetation) -> f32 {
    plant.width * 0.25
}

/// First active plant that blocks movement and overlaps a circle of
/// `radius` around `point`.
pub fn blocking_vegetation<'a>(
    store: &'a EntityStore<Vegetation>,
    table: &VegetationTable,
    point: Vec2,
    radius: f32,
) -> Option<&'a Vegetation> {
    store.iter_active().find(|plant| {
        if !table.get(plant.kind).blocks_movement {
            return false;
        }
        let reach = footprint_radius(plant) + radius;
        (planar(plant.position) - point).length_squared() < reach * reach
    })
}
