//! Cell-center point fields and the scale → cell-count mapping.
//!
//! All coordinates of one field come from a single [`Lcg`] stream, `x` then
//! `y` per point, so a field is a pure function of
//! `(seed, width, height, cell_count)`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::prng::Lcg;

/// Smallest user-facing density scale.
pub const MIN_SCALE: f64 = 0.1;
/// Largest user-facing density scale.
pub const MAX_SCALE: f64 = 4.0;
/// Cell count at `MIN_SCALE`.
pub const MIN_CELLS: usize = 100;
/// Cell count at `MAX_SCALE`.
pub const MAX_CELLS: usize = 10_000;

/// Maps a density scale in [0.1, 4.0] linearly onto [100, 10000] cells.
///
/// Out-of-range scales clamp; a non-finite scale maps to `MIN_CELLS`.
pub fn cell_count_for_scale(scale: f64) -> usize {
    if !scale.is_finite() {
        return MIN_CELLS;
    }
    let span = (MAX_CELLS - MIN_CELLS) as f64;
    let raw = MIN_CELLS as f64 + (scale - MIN_SCALE) * span / (MAX_SCALE - MIN_SCALE);
    raw.round().clamp(MIN_CELLS as f64, MAX_CELLS as f64) as usize
}

/// A deterministic set of cell centers over `[0, width) × [0, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointField {
    seed: u64,
    width: f64,
    height: f64,
    points: Vec<DVec2>,
}

impl PointField {
    /// Samples `cell_count` points uniformly from one `Lcg(seed)` stream.
    pub fn generate(cell_count: usize, width: f64, height: f64, seed: u64) -> Self {
        let mut rng = Lcg::new(seed);
        let points = (0..cell_count)
            .map(|_| {
                let x = rng.next_f64() * width;
                let y = rng.next_f64() * height;
                DVec2::new(x, y)
            })
            .collect();
        Self {
            seed,
            width,
            height,
            points,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when this field was generated from exactly these inputs.
    pub fn matches(&self, cell_count: usize, width: f64, height: f64, seed: u64) -> bool {
        self.seed == seed
            && self.points.len() == cell_count
            && self.width.to_bits() == width.to_bits()
            && self.height.to_bits() == height.to_bits()
    }
}
