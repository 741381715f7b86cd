//! Seedable random source shared by the simulation.
//!
//! Spawn positions, variant rolls and jump timings all draw from this one stream so a
//! fixed seed reproduces a whole run.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug, Clone)]
pub struct ArenaRng(ChaCha8Rng);

impl ArenaRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Uniform sample in `[lo, hi)`. Returns `lo` for an empty range.
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.range(0.0, 1.0)
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

impl Default for ArenaRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
