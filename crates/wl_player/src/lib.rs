use bevy::math::{Vec2, Vec3};
use bevy::prelude::*;

/// Eye height above the ground.
pub const EYE_HEIGHT: f32 = 1.7;

/// Where the player stands and which way they look.
///
/// `yaw` is a heading in degrees; zero looks down +z and 90 looks down +x,
/// the same convention the animals walk by.
#[derive(Resource, Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
        }
    }
}

impl PlayerPose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn planar_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Unit look direction on the ground plane.
    pub fn forward_planar(&self) -> Vec2 {
        let radians = self.yaw.to_radians();
        Vec2::new(radians.sin(), radians.cos())
    }

    /// Unit direction to the player's right on the ground plane.
    pub fn right_planar(&self) -> Vec2 {
        let forward = self.forward_planar();
        Vec2::new(forward.y, -forward.x)
    }

    pub fn turn(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees).rem_euclid(360.0);
        if self.yaw >= 360.0 {
            self.yaw = 0.0;
        }
    }

    /// Planar displacement for a step of `forward` and `strafe` units.
    pub fn step(&self, forward: f32, strafe: f32) -> Vec2 {
        self.forward_planar() * forward + self.right_planar() * strafe
    }

    pub fn move_forward(&mut self, distance: f32) {
        let offset = self.forward_planar() * distance;
        self.position.x += offset.x;
        self.position.z += offset.y;
    }

    /// Stand on the ground at `ground` height.
    pub fn stand_on(&mut self, ground: f32) {
        self.position.y = ground + EYE_HEIGHT;
    }
}

/// Player plugin for Wanderlands.
/// Owns the player pose resource read by the simulation.
pub struct WlPlayerPlugin;

impl Plugin for WlPlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerPose>();
    }
}
