use bevy::math::{Vec2, Vec3};
use rand::Rng;

/// Square patch of terrain used as the unit of procedural population.
///
/// Planar coordinates are stored as `Vec2(x, z)`; the vertical axis is Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chunk {
    /// World-space centre of the chunk on the XZ plane.
    pub origin: Vec2,
    /// Edge length in world units.
    pub size: f32,
}

impl Chunk {
    pub const fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    /// A chunk centred on the world origin. The whole terrain is one of these.
    pub const fn centered(size: f32) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Uniform point in `[-half, half]` on both axes, offset by the origin.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        let half = self.half_size();
        let x = rng.gen_range(-half..=half);
        let z = rng.gen_range(-half..=half);
        self.origin + Vec2::new(x, z)
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.half_size();
        (x - self.origin.x).abs() <= half && (z - self.origin.y).abs() <= half
    }
}

/// Project a world position onto the XZ plane.
pub fn planar(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0 in f32
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit XZ vector for a heading in degrees. 0° points along +Z, 90° along +X.
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.sin(), radians.cos())
}

/// Heading in degrees that points from `from` towards `to` on the XZ plane.
pub fn heading_towards(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_degrees(delta.x.atan2(delta.y).to_degrees())
}
