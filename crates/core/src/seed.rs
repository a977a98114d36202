//! Reproducible specification for a chip field.
//!
//! A [`FieldSpec`] captures everything needed to recreate a rendered
//! colorway: canvas dimensions, density scale, PRNG seed, palette, and the
//! light it is viewed under.

use serde::{Deserialize, Serialize};

use crate::error::ChipfieldError;
use crate::light::{self, NATURAL_ID};
use crate::palette::Palette;
use crate::points::{cell_count_for_scale, MAX_SCALE, MIN_SCALE};

fn default_scale() -> f64 {
    1.0
}

fn default_light() -> String {
    NATURAL_ID.to_string()
}

/// Reproducible specification for a chip field.
///
/// Two identical `FieldSpec` values always render the same cells. Missing
/// `scale` defaults to 1.0, missing `light` to `natural`, and a missing
/// palette to an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub seed: u64,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_light")]
    pub light: String,
}

impl FieldSpec {
    /// Creates a spec with scale 1.0, an empty palette, and natural light.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            scale: default_scale(),
            seed,
            palette: Palette::default(),
            light: default_light(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_light(mut self, light: impl Into<String>) -> Self {
        self.light = light.into();
        self
    }

    /// Cell count implied by `scale`.
    pub fn cell_count(&self) -> usize {
        cell_count_for_scale(self.scale)
    }

    /// Checks dimensions, scale range, and that the light id is registered.
    pub fn validate(&self) -> Result<(), ChipfieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(ChipfieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(ChipfieldError::InvalidDimensions)?;
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(ChipfieldError::InvalidScale(self.scale));
        }
        light::resolve(&self.light)?;
        Ok(())
    }
}
