use bevy::log::debug;
use bevy::math::Vec3;
use wl_core::{planar, EntityStore};
use wl_player::PlayerPose;
use wl_world::{TextureHandle, Vegetation};

/// How far the player can reach with a cutting swing.
pub const CUTTING_RANGE: f32 = 2.0;

/// Leaf burst spawned where a bush was cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub position: Vec3,
    pub texture: TextureHandle,
}

/// Sink for particle bursts; the particle system proper lives with the
/// renderer.
pub trait ParticleEmitter {
    fn spawn_burst(&mut self, position: Vec3, texture: TextureHandle);
}

impl ParticleEmitter for Vec<ParticleBurst> {
    fn spawn_burst(&mut self, position: Vec3, texture: TextureHandle) {
        self.push(ParticleBurst { position, texture });
    }
}

/// Cut every cuttable plant in reach and in front of the player.
///
/// Cut plants are deactivated on the spot and each one emits a leaf burst.
/// Returns how many were cut.
pub fn cut_foliage(
    store: &mut EntityStore<Vegetation>,
    player: &PlayerPose,
    leaf_texture: TextureHandle,
    emitter: &mut impl ParticleEmitter,
) -> usize {
    let origin = player.planar_position();
    let forward = player.forward_planar();
    let reach = CUTTING_RANGE * CUTTING_RANGE;
    let mut cut = 0;

    for plant in store.iter_active_mut().filter(|p| p.kind.is_cuttable()) {
        let offset = planar(plant.position) - origin;
        if offset.length_squared() > reach {
            continue;
        }
        if offset.dot(forward) > 0.0 {
            plant.active = false;
            emitter.spawn_burst(plant.position, leaf_texture);
            cut += 1;
        }
    }

    if cut > 0 {
        debug!("Cut {} bushes", cut);
    }
    cut
}
