//! Random number generator abstraction for combat draws.
//!
//! In play this wraps a real RNG. Tests inject a fixed or scripted source
//! from [`crate::testing`] to pin down boundary behaviour.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform integer generator over an inclusive range.
pub trait RandomSource {
    /// Draw a value in `[low, high]` inclusive.
    fn range(&mut self, low: u32, high: u32) -> u32;
}

/// The production source, backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// A reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is given, otherwise from the operating system.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for StdRandom {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.random_range(low..=high)
    }
}
