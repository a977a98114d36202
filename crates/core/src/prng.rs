//! Deterministic PRNG based on a 32-bit linear congruential generator.
//!
//! The constants (1664525, 1013904223, modulus 2^32) are the Numerical
//! Recipes LCG. They are fixed so that any implementation fed the same seed
//! reproduces the same tiling bit for bit.

use serde::{Deserialize, Serialize};

/// 32-bit LCG. Same seed always produces the same sequence.
///
/// `state' = (state * 1664525 + 1013904223) mod 2^32` and each output is
/// `state' / 2^32`, a real in [0, 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MULTIPLIER: u32 = 1_664_525;
    const INCREMENT: u32 = 1_013_904_223;
    const MODULUS: f64 = 4_294_967_296.0;

    /// Creates a generator from `seed` reduced mod 2^32.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed as u32,
        }
    }

    /// Restarts the sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed as u32;
    }

    /// Advances the state and returns it.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Returns the next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / Self::MODULUS
    }

    /// Returns a value in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Seed for the color draw of cell `index`: `base + index` mod 2^32.
///
/// Offsetting the seed decorrelates neighbouring cells well enough for a
/// visual mix. It is a heuristic, not a statistical independence guarantee:
/// first draws of consecutive seeds are evenly spaced rather than random.
pub fn cell_seed(base: u64, index: usize) -> u64 {
    u64::from((base as u32).wrapping_add(index as u32))
}
