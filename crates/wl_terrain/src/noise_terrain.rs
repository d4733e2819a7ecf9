use noise::{NoiseFn, OpenSimplex};
use wl_core::GroundHeight;

/// Rolling hills from fBm (fractal Brownian motion) over OpenSimplex noise.
///
/// Output range: approximately `[base - amplitude, base + amplitude]`.
pub struct NoiseTerrain {
    noise: OpenSimplex,
    octaves: u32,
    frequency: f64,
    persistence: f64,
    lacunarity: f64,
    amplitude: f32,
    base_height: f32,
}

impl NoiseTerrain {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            octaves: 4,
            frequency: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            amplitude: 1.5,
            base_height: 0.0,
        }
    }

    pub fn with_params(
        seed: u32,
        octaves: u32,
        frequency: f64,
        persistence: f64,
        lacunarity: f64,
        amplitude: f32,
    ) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            octaves,
            frequency,
            persistence,
            lacunarity,
            amplitude,
            base_height: 0.0,
        }
    }

    pub fn with_base_height(mut self, base_height: f32) -> Self {
        self.base_height = base_height;
        self
    }

    /// Normalized fBm in `[-1, 1]`.
    fn fbm(&self, x: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut freq = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            // 0.03 keeps hills a few dozen units wide
            let nx = x * freq * 0.03;
            let nz = z * freq * 0.03;
            value += self.noise.get([nx, nz]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.persistence;
            freq *= self.lacunarity;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        value / max_amplitude
    }
}

impl GroundHeight for NoiseTerrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.base_height + self.fbm(x as f64, z as f64) as f32 * self.amplitude
    }

    fn name(&self) -> &'static str {
        "NoiseTerrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_stay_within_amplitude() {
        let terrain = NoiseTerrain::new(42);
        for i in -20..20 {
            for j in -20..20 {
                let h = terrain.height_at(i as f32 * 1.7, j as f32 * 2.3);
                assert!(h.abs() <= 1.6, "height {} out of range", h);
            }
        }
    }

    #[test]
    fn terrain_is_deterministic() {
        let a = NoiseTerrain::new(7);
        let b = NoiseTerrain::new(7);
        assert_eq!(a.height_at(12.5, -3.25), b.height_at(12.5, -3.25));
    }

    #[test]
    fn zero_octaves_is_flat() {
        let terrain = NoiseTerrain::with_params(1, 0, 1.0, 0.5, 2.0, 3.0).with_base_height(2.0);
        assert_eq!(terrain.height_at(5.0, 5.0), 2.0);
    }
}
