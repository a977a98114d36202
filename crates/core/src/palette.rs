//! Weighted chip palettes (colorways).
//!
//! A [`Palette`] is an ordered list of [`ChipColor`]s. Order matters: the
//! sampler walks cumulative densities in palette order, so reordering
//! entries changes which chip each cell draws. Palettes are never sorted.

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ChipfieldError;

/// One chip color and its relative density in the mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipColor {
    #[serde(default)]
    pub id: String,
    pub hex: HexColor,
    pub density: f64,
}

impl ChipColor {
    pub fn new(id: impl Into<String>, hex: HexColor, density: f64) -> Self {
        Self {
            id: id.into(),
            hex,
            density,
        }
    }
}

/// Returns `InvalidDensity` for the first negative, NaN, or infinite density.
pub fn validate_densities(colors: &[ChipColor]) -> Result<(), ChipfieldError> {
    match colors
        .iter()
        .enumerate()
        .find(|(_, c)| !c.density.is_finite() || c.density < 0.0)
    {
        Some((index, c)) => Err(ChipfieldError::InvalidDensity {
            index,
            value: c.density,
        }),
        None => Ok(()),
    }
}

/// An ordered, validated list of chip colors.
///
/// May be empty; an empty palette renders as a flat neutral fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChipColor>", into = "Vec<ChipColor>")]
pub struct Palette {
    colors: Vec<ChipColor>,
}

impl TryFrom<Vec<ChipColor>> for Palette {
    type Error = ChipfieldError;

    fn try_from(colors: Vec<ChipColor>) -> Result<Self, Self::Error> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<ChipColor> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

/// Built-in colorway names.
const PALETTE_NAMES: &[&str] = &["terrazzo", "confetti", "speckle", "monochrome"];

impl Palette {
    /// Creates a palette, validating every density.
    ///
    /// Entries with an empty id get `color-<index>`.
    pub fn new(colors: Vec<ChipColor>) -> Result<Self, ChipfieldError> {
        validate_densities(&colors)?;
        let colors = colors
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                if c.id.is_empty() {
                    c.id = format!("color-{i}");
                }
                c
            })
            .collect();
        Ok(Self { colors })
    }

    /// Creates a palette from `(hex, density)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Result<Self, ChipfieldError> {
        let colors = pairs
            .iter()
            .map(|&(hex, density)| HexColor::parse(hex).map(|h| ChipColor::new("", h, density)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[ChipColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Sum of all densities.
    pub fn total_density(&self) -> f64 {
        self.colors.iter().map(|c| c.density).sum()
    }

    /// Replaces the hex of entry `index`. Densities and order are untouched,
    /// so the per-cell draw sequence does not change.
    pub fn set_hex(&mut self, index: usize, hex: HexColor) -> Result<(), ChipfieldError> {
        self.entry_mut(index)?.hex = hex;
        Ok(())
    }

    /// Replaces the density of entry `index` after validating it.
    pub fn set_density(&mut self, index: usize, density: f64) -> Result<(), ChipfieldError> {
        if !density.is_finite() || density < 0.0 {
            return Err(ChipfieldError::InvalidDensity {
                index,
                value: density,
            });
        }
        self.entry_mut(index)?.density = density;
        Ok(())
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ChipColor, ChipfieldError> {
        let len = self.colors.len();
        self.colors
            .get_mut(index)
            .ok_or(ChipfieldError::IndexOutOfRange { index, len })
    }

    /// Appends a color after validating its density.
    pub fn push(&mut self, color: ChipColor) -> Result<(), ChipfieldError> {
        validate_densities(std::slice::from_ref(&color)).map_err(|_| {
            ChipfieldError::InvalidDensity {
                index: self.colors.len(),
                value: color.density,
            }
        })?;
        let mut color = color;
        if color.id.is_empty() {
            color.id = format!("color-{}", self.colors.len());
        }
        self.colors.push(color);
        Ok(())
    }

    // -- Built-in colorways --

    fn builtin(entries: &[([u8; 3], f64)]) -> Self {
        let colors = entries
            .iter()
            .enumerate()
            .map(|(i, &(rgb, density))| {
                ChipColor::new(format!("color-{i}"), HexColor::from_rgb8(rgb), density)
            })
            .collect();
        Self { colors }
    }

    /// Cream base with charcoal, rust, and sage chips.
    pub fn terrazzo() -> Self {
        Self::builtin(&[
            ([0xED, 0xE6, 0xD6], 6.0),
            ([0x3B, 0x3B, 0x3B], 1.5),
            ([0xB5, 0x56, 0x2E], 1.0),
            ([0x8F, 0xA5, 0x8A], 1.0),
            ([0xD9, 0xB2, 0x6F], 0.5),
        ])
    }

    /// Bright, evenly mixed primaries.
    pub fn confetti() -> Self {
        Self::builtin(&[
            ([0xE6, 0x39, 0x46], 1.0),
            ([0xF1, 0xC4, 0x0F], 1.0),
            ([0x2A, 0x9D, 0x8F], 1.0),
            ([0x45, 0x7B, 0x9D], 1.0),
            ([0xF4, 0xA2, 0x61], 1.0),
        ])
    }

    /// Mostly white with rare dark specks.
    pub fn speckle() -> Self {
        Self::builtin(&[
            ([0xF7, 0xF7, 0xF2], 18.0),
            ([0x1D, 0x1D, 0x1D], 1.0),
            ([0x7A, 0x7A, 0x7A], 1.0),
        ])
    }

    /// Black, grays, and white in equal parts.
    pub fn monochrome() -> Self {
        Self::builtin(&[
            ([0x00, 0x00, 0x00], 1.0),
            ([0x40, 0x40, 0x40], 1.0),
            ([0x80, 0x80, 0x80], 1.0),
            ([0xC0, 0xC0, 0xC0], 1.0),
            ([0xFF, 0xFF, 0xFF], 1.0),
        ])
    }

    /// Looks up a built-in colorway by name.
    pub fn from_name(name: &str) -> Result<Self, ChipfieldError> {
        match name {
            "terrazzo" => Ok(Self::terrazzo()),
            "confetti" => Ok(Self::confetti()),
            "speckle" => Ok(Self::speckle()),
            "monochrome" => Ok(Self::monochrome()),
            _ => Err(ChipfieldError::UnknownPalette(name.to_string())),
        }
    }

    /// Names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_empty_palette() {
        let palette = Palette::new(vec![]).unwrap();
        assert!(palette.is_empty());
    }

    #[test]
    fn new_rejects_negative_density() {
        let result = Palette::from_pairs(&[("#FF0000", 1.0), ("#00FF00", -0.5)]);
        assert_eq!(
            result,
            Err(ChipfieldError::InvalidDensity {
                index: 1,
                value: -0.5
            })
        );
    }

    #[test]
    fn new_rejects_nan_and_infinite_density() {
        assert!(matches!(
            Palette::from_pairs(&[("#FF0000", f64::NAN)]),
            Err(ChipfieldError::InvalidDensity { index: 0, .. })
        ));
        assert!(matches!(
            Palette::from_pairs(&[("#FF0000", f64::INFINITY)]),
            Err(ChipfieldError::InvalidDensity { index: 0, .. })
        ));
    }

    #[test]
    fn from_pairs_rejects_bad_hex() {
        assert!(matches!(
            Palette::from_pairs(&[("#FF00", 1.0)]),
            Err(ChipfieldError::InvalidHex(_))
        ));
    }

    #[test]
    fn ids_are_filled_in_order() {
        let palette = Palette::from_pairs(&[("#FF0000", 1.0), ("#00FF00", 2.0)]).unwrap();
        let ids: Vec<&str> = palette.colors().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["color-0", "color-1"]);
    }

    #[test]
    fn order_is_preserved() {
        let palette =
            Palette::from_pairs(&[("#0000FF", 1.0), ("#FF0000", 5.0), ("#00FF00", 0.0)]).unwrap();
        let hexes: Vec<&str> = palette.colors().iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(hexes, ["#0000FF", "#FF0000", "#00FF00"]);
        assert_eq!(palette.total_density(), 6.0);
    }

    #[test]
    fn set_density_validates() {
        let mut palette = Palette::from_pairs(&[("#FF0000", 1.0)]).unwrap();
        assert!(palette.set_density(0, -1.0).is_err());
        palette.set_density(0, 4.0).unwrap();
        assert_eq!(palette.colors()[0].density, 4.0);
    }

    #[test]
    fn edits_past_the_end_are_rejected() {
        let mut palette = Palette::from_pairs(&[("#FF0000", 1.0)]).unwrap();
        let before = palette.clone();
        assert_eq!(
            palette.set_density(1, 2.0),
            Err(ChipfieldError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            palette.set_hex(5, HexColor::parse("#00FF00").unwrap()),
            Err(ChipfieldError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(palette, before);
        assert!(Palette::default().set_density(0, 1.0).is_err());
    }

    #[test]
    fn push_validates_and_assigns_id() {
        let mut palette = Palette::default();
        palette
            .push(ChipColor::new("", HexColor::parse("#123456").unwrap(), 1.0))
            .unwrap();
        assert_eq!(palette.colors()[0].id, "color-0");
        let bad = ChipColor::new("x", HexColor::parse("#123456").unwrap(), f64::NAN);
        assert!(matches!(
            palette.push(bad),
            Err(ChipfieldError::InvalidDensity { index: 1, .. })
        ));
    }

    #[test]
    fn built_ins_are_reachable_by_name() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(!palette.is_empty(), "{name} is empty");
        }
        assert!(matches!(
            Palette::from_name("plaid"),
            Err(ChipfieldError::UnknownPalette(_))
        ));
    }

    #[test]
    fn built_ins_have_valid_densities_and_ids() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(validate_densities(palette.colors()).is_ok());
            assert!(palette.total_density() > 0.0);
            assert_eq!(palette.colors()[0].id, "color-0");
        }
    }

    #[test]
    fn json_round_trip() {
        let palette = Palette::terrazzo();
        let json = serde_json::to_string(&palette).unwrap();
        let restored: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(palette, restored);
    }

    #[test]
    fn json_rejects_invalid_density() {
        let json = r##"[{"hex": "#FF0000", "density": -2}]"##;
        let result: Result<Palette, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn json_id_is_optional() {
        let json = r##"[{"hex": "#ff0000", "density": 3}]"##;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.colors()[0].id, "color-0");
        assert_eq!(palette.colors()[0].hex.as_str(), "#FF0000");
    }
}
