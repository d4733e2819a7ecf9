//! Camera-facing billboard math for entities drawn with eight pre-rendered
//! directional sprites.

use bevy::math::Vec3;

use crate::coords::normalize_degrees;

/// Number of directional sprites per entity kind.
pub const SPRITE_DIRECTIONS: usize = 8;

const BUCKET_DEGREES: f32 = 360.0 / SPRITE_DIRECTIONS as f32;

/// Angle in degrees, in `[0, 360)`, at which the camera sees the entity on
/// the XZ plane. 0° means the camera sits on the entity's +Z side.
pub fn viewing_angle(entity: Vec3, camera: Vec3) -> f32 {
    let dx = camera.x - entity.x;
    let dz = camera.z - entity.z;
    normalize_degrees(dx.atan2(dz).to_degrees())
}

/// Index of the directional sprite to draw for an entity facing `facing`
/// degrees, seen from `camera`.
///
/// The relative angle is bucketed into 45° slices centred on multiples of 45°,
/// then mirrored (`7 - bucket`) to match the storage order of the sprite sheets.
pub fn sprite_direction(entity: Vec3, camera: Vec3, facing: f32) -> usize {
    let relative = normalize_degrees(viewing_angle(entity, camera) - facing);
    let bucket =
        ((relative + BUCKET_DEGREES * 0.5) / BUCKET_DEGREES).floor() as usize % SPRITE_DIRECTIONS;
    SPRITE_DIRECTIONS - 1 - bucket
}

/// Corners of a camera-facing quad anchored at its bottom centre.
///
/// Returned in order bottom-left, bottom-right, top-right, top-left.
pub fn billboard_corners(base: Vec3, right: Vec3, up: Vec3, width: f32, height: f32) -> [Vec3; 4] {
    let half_right = right * (width * 0.5);
    let top = up * height;
    [
        base - half_right,
        base + half_right,
        base + half_right + top,
        base - half_right + top,
    ]
}
