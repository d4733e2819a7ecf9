//! Ground height samplers backed by fractal noise.

pub mod noise_terrain;

pub use noise_terrain::NoiseTerrain;
