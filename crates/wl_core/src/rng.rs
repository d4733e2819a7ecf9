use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Error, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The shared pseudo-random stream used by every world generator.
///
/// Generators reseed it from the world seed before placing entities and hand
/// it back to a clock-derived seed afterwards, so later unrelated draws are not
/// trivially predictable from the world seed.
#[derive(Debug, Clone)]
pub struct WorldRng {
    rng: ChaCha8Rng,
    seed: Option<u32>,
}

impl WorldRng {
    /// Stream seeded deterministically from a 32-bit world seed.
    pub fn from_seed(seed: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            seed: Some(seed),
        }
    }

    /// Stream seeded from the wall clock.
    pub fn from_clock() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(clock_seed()),
            seed: None,
        }
    }

    /// Restart the stream from `seed`. Two streams reseeded with the same
    /// value produce identical sequences.
    pub fn reseed(&mut self, seed: u32) {
        self.rng = ChaCha8Rng::seed_from_u64(seed as u64);
        self.seed = Some(seed);
    }

    /// Restart the stream from the wall clock.
    pub fn reseed_from_clock(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(clock_seed());
        self.seed = None;
    }

    /// The world seed currently driving the stream, or `None` while it runs
    /// on a clock-derived seed.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }
}

impl Default for WorldRng {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl RngCore for WorldRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Uniform value between two bounds, inclusive. Bounds may come in either
/// order, so malformed catalog ranges never panic.
pub fn uniform_between(rng: &mut impl Rng, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(low..=high)
}

/// Uniform integer between two bounds, inclusive, in either order.
pub fn uniform_count(rng: &mut impl Rng, a: u32, b: u32) -> u32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(low..=high)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
