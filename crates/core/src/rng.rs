//! RNG module - seedable randomness for shape selection
//!
//! Every random choice the core makes (shape kind, color, orientation) goes
//! through [`RandomSource`], so a session can be driven by a fixed seed in
//! tests and by a clock-derived seed in the binary.

use crate::types::{BlockColor, Orientation, ShapeKind};

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Random value in range [0, max). `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;

    /// Uniformly chosen shape kind
    fn shape_kind(&mut self) -> ShapeKind {
        pick(self, &ShapeKind::ALL)
    }

    /// Uniformly chosen block color
    fn block_color(&mut self) -> BlockColor {
        pick(self, &BlockColor::ALL)
    }

    /// Uniformly chosen orientation
    fn orientation(&mut self) -> Orientation {
        pick(self, &Orientation::ALL)
    }
}

fn pick<R: RandomSource + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    let index = rng.next_range(items.len() as u32) as usize;
    // Implementations may hand back values >= max; clamp instead of indexing past the end.
    items[index % items.len()]
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_every_kind_is_reachable() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [0u32; 7];
        for _ in 0..7000 {
            let kind = rng.shape_kind();
            let idx = ShapeKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[idx] += 1;
        }
        // Roughly uniform: every kind within a generous band around 1000
        for count in seen {
            assert!((700..1300).contains(&count), "skewed distribution: {:?}", seen);
        }
    }

    #[test]
    fn test_out_of_range_source_is_clamped() {
        struct Wild;
        impl RandomSource for Wild {
            fn next_range(&mut self, max: u32) -> u32 {
                max + 3
            }
        }
        // 7 + 3 = 10 -> 10 % 7 = 3
        assert_eq!(Wild.shape_kind(), ShapeKind::L);
    }
}
