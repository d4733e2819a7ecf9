//! Day-night cycle and the lighting it drives.

use bevy::prelude::*;

pub mod cycle;
pub mod lighting;

pub use cycle::{DayNightCycle, DEFAULT_DAY_LENGTH};
pub use lighting::{blend_window, lighting_at, BlendWindow, LightingParams, Period, BLEND_WINDOWS};

/// Publishes the lighting for the current frame as a resource.
pub struct WlSkyPlugin;

impl Plugin for WlSkyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightingParams>();
    }
}
