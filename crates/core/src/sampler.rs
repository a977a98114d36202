//! Density-weighted color draws.
//!
//! A single closed-form categorical draw: one uniform value `u`, scaled by
//! the total density, then a linear scan over cumulative sums in palette
//! order. The first color whose cumulative sum reaches `u * total` wins.

use crate::error::ChipfieldError;
use crate::palette::{validate_densities, ChipColor};
use crate::prng::Lcg;

/// A source of uniform values in [0, 1).
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl UnitSource for Lcg {
    fn next_unit(&mut self) -> f64 {
        self.next_f64()
    }
}

/// Non-deterministic source backed by the thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSource;

impl UnitSource for ThreadSource {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Draws a palette index from `colors` using `source`.
///
/// - empty: `ChipfieldError::EmptyPalette`
/// - any negative, NaN, or infinite density: `ChipfieldError::InvalidDensity`
/// - one color: index 0, no value consumed
/// - all densities zero: uniform index draw
/// - finite densities whose sum overflows: weighed relative to the largest
pub fn draw_index<S: UnitSource + ?Sized>(
    colors: &[ChipColor],
    source: &mut S,
) -> Result<usize, ChipfieldError> {
    if colors.is_empty() {
        return Err(ChipfieldError::EmptyPalette);
    }
    validate_densities(colors)?;
    let n = colors.len();
    if n == 1 {
        return Ok(0);
    }

    let mut scale = 1.0;
    let mut total: f64 = colors.iter().map(|c| c.density).sum();
    if total == 0.0 {
        let idx = (source.next_unit() * n as f64).floor() as usize;
        return Ok(idx.min(n - 1));
    }
    if !total.is_finite() {
        // Finite densities whose sum overflows: weigh relative to the largest.
        scale = colors.iter().map(|c| c.density).fold(0.0, f64::max);
        total = colors.iter().map(|c| c.density / scale).sum();
    }

    let r = source.next_unit() * total;
    let mut cumulative = 0.0;
    for (i, c) in colors.iter().enumerate() {
        cumulative += c.density / scale;
        if cumulative >= r {
            return Ok(i);
        }
    }
    // Rounding left r above the final sum.
    Ok(n - 1)
}

/// Unseeded draw. Not used by the deterministic render path.
pub fn draw(colors: &[ChipColor]) -> Result<&ChipColor, ChipfieldError> {
    let idx = draw_index(colors, &mut ThreadSource)?;
    Ok(&colors[idx])
}

/// Deterministic draw from a fresh `Lcg(seed)`.
pub fn draw_seeded_index(colors: &[ChipColor], seed: u64) -> Result<usize, ChipfieldError> {
    draw_index(colors, &mut Lcg::new(seed))
}

/// Deterministic draw returning the color itself.
pub fn draw_seeded(colors: &[ChipColor], seed: u64) -> Result<&ChipColor, ChipfieldError> {
    let idx = draw_seeded_index(colors, seed)?;
    Ok(&colors[idx])
}
