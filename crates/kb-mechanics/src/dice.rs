//! Inclusive damage ranges.

use std::fmt;

use kb_core::RandomSource;
use serde::{Deserialize, Serialize};

/// A uniform damage draw over `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    /// Smallest possible damage.
    pub low: u32,
    /// Largest possible damage.
    pub high: u32,
}

impl DamageRange {
    /// Create a range. Bounds are reordered if given backwards.
    pub const fn new(low: u32, high: u32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// Draw one damage value.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> u32 {
        rng.range(self.low, self.high)
    }

    /// Check whether a value could have come from this range.
    pub fn contains(&self, value: u32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::StdRandom;
    use kb_core::testing::FixedRng;

    #[test]
    fn fixed_source_hits_bounds() {
        let range = DamageRange::new(5, 15);
        assert_eq!(range.roll(&mut FixedRng::Min), 5);
        assert_eq!(range.roll(&mut FixedRng::Max), 15);
    }

    #[test]
    fn backwards_bounds() {
        let range = DamageRange::new(30, 15);
        assert_eq!(range, DamageRange::new(15, 30));
    }

    #[test]
    fn seeded_rolls_in_range() {
        let range = DamageRange::new(10, 25);
        let mut rng = StdRandom::seeded(7);
        for _ in 0..200 {
            assert!(range.contains(range.roll(&mut rng)));
        }
    }

    #[test]
    fn display() {
        assert_eq!(DamageRange::new(15, 30).to_string(), "15-30");
    }
}
