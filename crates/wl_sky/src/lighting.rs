//! Lighting and fog presets per period of the day and the blend between them.

use bevy::math::Vec4;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Day,
    Evening,
    Night,
    Morning,
}

impl Period {
    /// Classify a time of day in `[0, 1)`.
    ///
    /// These cut points (0.4, 0.5, 0.9) are not the blend window edges used
    /// by [`lighting_at`]; the two sets are kept apart on purpose.
    pub fn from_time(time: f32) -> Self {
        if time < 0.4 {
            Period::Day
        } else if time < 0.5 {
            Period::Evening
        } else if time < 0.9 {
            Period::Night
        } else {
            Period::Morning
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Evening => "Evening",
            Period::Night => "Night",
            Period::Morning => "Morning",
        }
    }

    /// Reference lighting for this period.
    pub fn preset(&self) -> LightingParams {
        match self {
            Period::Day => LightingParams::DAY,
            Period::Evening => LightingParams::EVENING,
            Period::Night => LightingParams::NIGHT,
            Period::Morning => LightingParams::MORNING,
        }
    }
}

/// Everything the renderer needs to light one frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LightingParams {
    pub fog_color: Vec4,
    /// Homogeneous light position; w = 0 makes it directional.
    pub light_position: Vec4,
    pub light_ambient: Vec4,
    pub light_diffuse: Vec4,
    pub light_specular: Vec4,
    pub material_ambient: Vec4,
    pub material_diffuse: Vec4,
    pub material_specular: Vec4,
    pub material_emission: Vec4,
    pub shininess: f32,
    pub clear_color: Vec4,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self::DAY
    }
}

impl LightingParams {
    pub const DAY: LightingParams = LightingParams {
        fog_color: Vec4::new(0.72, 0.82, 0.92, 1.0),
        light_position: Vec4::new(0.3, 1.0, 0.4, 0.0),
        light_ambient: Vec4::new(0.55, 0.55, 0.55, 1.0),
        light_diffuse: Vec4::new(1.0, 0.98, 0.92, 1.0),
        light_specular: Vec4::new(0.6, 0.6, 0.6, 1.0),
        material_ambient: Vec4::new(0.8, 0.8, 0.8, 1.0),
        material_diffuse: Vec4::new(0.9, 0.9, 0.9, 1.0),
        material_specular: Vec4::new(0.2, 0.2, 0.2, 1.0),
        material_emission: Vec4::new(0.0, 0.0, 0.0, 1.0),
        shininess: 20.0,
        clear_color: Vec4::new(0.53, 0.75, 0.95, 1.0),
    };

    pub const EVENING: LightingParams = LightingParams {
        fog_color: Vec4::new(0.85, 0.55, 0.40, 1.0),
        light_position: Vec4::new(-0.8, 0.3, 0.2, 0.0),
        light_ambient: Vec4::new(0.40, 0.30, 0.28, 1.0),
        light_diffuse: Vec4::new(0.95, 0.60, 0.40, 1.0),
        light_specular: Vec4::new(0.4, 0.3, 0.2, 1.0),
        material_ambient: Vec4::new(0.7, 0.6, 0.55, 1.0),
        material_diffuse: Vec4::new(0.85, 0.7, 0.6, 1.0),
        material_specular: Vec4::new(0.15, 0.12, 0.1, 1.0),
        material_emission: Vec4::new(0.02, 0.01, 0.0, 1.0),
        shininess: 12.0,
        clear_color: Vec4::new(0.90, 0.50, 0.35, 1.0),
    };

    pub const NIGHT: LightingParams = LightingParams {
        fog_color: Vec4::new(0.04, 0.05, 0.10, 1.0),
        light_position: Vec4::new(-0.2, 0.8, -0.5, 0.0),
        light_ambient: Vec4::new(0.08, 0.09, 0.15, 1.0),
        light_diffuse: Vec4::new(0.20, 0.22, 0.35, 1.0),
        light_specular: Vec4::new(0.1, 0.1, 0.15, 1.0),
        material_ambient: Vec4::new(0.3, 0.3, 0.4, 1.0),
        material_diffuse: Vec4::new(0.35, 0.35, 0.45, 1.0),
        material_specular: Vec4::new(0.05, 0.05, 0.08, 1.0),
        material_emission: Vec4::new(0.0, 0.0, 0.02, 1.0),
        shininess: 4.0,
        clear_color: Vec4::new(0.02, 0.03, 0.08, 1.0),
    };

    pub const MORNING: LightingParams = LightingParams {
        fog_color: Vec4::new(0.80, 0.70, 0.65, 1.0),
        light_position: Vec4::new(0.8, 0.3, 0.3, 0.0),
        light_ambient: Vec4::new(0.35, 0.32, 0.32, 1.0),
        light_diffuse: Vec4::new(0.90, 0.75, 0.60, 1.0),
        light_specular: Vec4::new(0.35, 0.3, 0.25, 1.0),
        material_ambient: Vec4::new(0.7, 0.65, 0.6, 1.0),
        material_diffuse: Vec4::new(0.8, 0.75, 0.7, 1.0),
        material_specular: Vec4::new(0.12, 0.1, 0.1, 1.0),
        material_emission: Vec4::new(0.01, 0.01, 0.0, 1.0),
        shininess: 10.0,
        clear_color: Vec4::new(0.85, 0.65, 0.55, 1.0),
    };

    /// Componentwise linear blend; `t = 0` gives `self`.
    pub fn lerp(&self, other: &LightingParams, t: f32) -> LightingParams {
        LightingParams {
            fog_color: self.fog_color.lerp(other.fog_color, t),
            light_position: self.light_position.lerp(other.light_position, t),
            light_ambient: self.light_ambient.lerp(other.light_ambient, t),
            light_diffuse: self.light_diffuse.lerp(other.light_diffuse, t),
            light_specular: self.light_specular.lerp(other.light_specular, t),
            material_ambient: self.material_ambient.lerp(other.material_ambient, t),
            material_diffuse: self.material_diffuse.lerp(other.material_diffuse, t),
            material_specular: self.material_specular.lerp(other.material_specular, t),
            material_emission: self.material_emission.lerp(other.material_emission, t),
            shininess: self.shininess + (other.shininess - self.shininess) * t,
            clear_color: self.clear_color.lerp(other.clear_color, t),
        }
    }
}

/// A stretch of the day during which lighting goes from one preset to the
/// next. A window from a period to itself holds that preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWindow {
    pub start: f32,
    pub end: f32,
    pub from: Period,
    pub to: Period,
}

impl BlendWindow {
    const fn new(start: f32, end: f32, from: Period, to: Period) -> Self {
        Self { start, end, from, to }
    }

    /// Progress through the window in `[0, 1)`.
    pub fn progress(&self, time: f32) -> f32 {
        ((time - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Windows covering `[0, 1)` without gaps.
pub const BLEND_WINDOWS: [BlendWindow; 6] = [
    BlendWindow::new(0.0, 0.39, Period::Day, Period::Day),
    BlendWindow::new(0.39, 0.5, Period::Day, Period::Evening),
    BlendWindow::new(0.5, 0.52, Period::Evening, Period::Night),
    BlendWindow::new(0.52, 0.9, Period::Night, Period::Night),
    BlendWindow::new(0.9, 0.98, Period::Night, Period::Morning),
    BlendWindow::new(0.98, 1.0, Period::Morning, Period::Day),
];

/// Window containing `time`.
pub fn blend_window(time: f32) -> &'static BlendWindow {
    let time = time.rem_euclid(1.0);
    BLEND_WINDOWS
        .iter()
        .find(|w| time < w.end)
        .unwrap_or(&BLEND_WINDOWS[BLEND_WINDOWS.len() - 1])
}

/// Lighting at an exact time of day.
pub fn lighting_at(time: f32) -> LightingParams {
    let window = blend_window(time);
    if window.from == window.to {
        return window.from.preset();
    }
    window
        .from
        .preset()
        .lerp(&window.to.preset(), window.progress(time.rem_euclid(1.0)))
}
