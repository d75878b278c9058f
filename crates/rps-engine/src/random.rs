//! Random number sources
//!
//! Every random decision the engine makes goes through [`RandomSource`],
//! so a session can run on a seeded generator in production and on a
//! scripted sequence in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform draws consumed by the decision engine
pub trait RandomSource {
    /// Generate a value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Generate a value in [0, max)
    fn next_below(&mut self, max: f64) -> f64 {
        self.next_unit() * max
    }

    /// Generate an index in [0, len)
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len - 1)
    }
}

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    /// Create a new RNG from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG seeded from the operating system
    ///
    /// The chosen seed is kept so a session can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}
