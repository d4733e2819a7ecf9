/// Vertical offset added above the sampled ground so flat sprites do not
/// z-fight with the ground mesh.
pub const GROUND_CLEARANCE: f32 = 0.01;

/// Ground height query used by every placement and movement routine.
///
/// The trait is object-safe so a session can hold any terrain behind an `Arc`.
pub trait GroundHeight: Send + Sync {
    /// Height of the ground surface at world coordinates `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Returns the name of this terrain for debugging.
    fn name(&self) -> &'static str {
        "GroundHeight"
    }
}

/// Perfectly level ground at a fixed height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl FlatGround {
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl GroundHeight for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn name(&self) -> &'static str {
        "Flat"
    }
}
