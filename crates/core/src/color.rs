//! Color types and conversion functions for chipfield.
//!
//! Provides the canonical [`HexColor`] used throughout the palette and the
//! three numeric representations the photometric pipeline walks through:
//! [`Srgb`] (gamma-encoded, [0, 1]), [`LinearRgb`], and CIE 1931 [`Xyz`]
//! scaled so the white point has Y = 100. Uses `f64` throughout.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChipfieldError;
use crate::matrix::{SRGB_TO_XYZ, XYZ_TO_SRGB};

/// A color as a canonical `#RRGGBB` string (uppercase hex digits).
///
/// Parsing accepts `#rrggbb` or `rrggbb` in any case and normalizes.
/// Equality and hashing use the canonical form, so `#ff0000` and `#FF0000`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(String);

impl HexColor {
    /// Black, the value every numeric fault degrades to.
    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    /// Parses and normalizes a hex color string.
    ///
    /// Returns `ChipfieldError::InvalidHex` unless the input is exactly six
    /// hex digits with an optional leading `#`.
    pub fn parse(input: &str) -> Result<Self, ChipfieldError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChipfieldError::InvalidHex(input.to_string()));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Builds a hex color from 8-bit channels.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    /// Decodes the three 8-bit channels.
    pub fn rgb8(&self) -> [u8; 3] {
        let digits = &self.0[1..];
        // Canonical form is guaranteed by construction.
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }

    /// The canonical `#RRGGBB` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = ChipfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// sRGB color with gamma-encoded components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// CIE 1931 XYZ tristimulus values, scaled so white has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// D65 reference white (sRGB's native white point).
    pub const D65: Xyz = Xyz::new(95.047, 100.0, 108.883);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// True when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Srgb {
    /// Normalizes a hex color's 8-bit channels to [0, 1].
    pub fn from_hex(hex: &HexColor) -> Srgb {
        let [r, g, b] = hex.rgb8();
        Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Clamps to [0, 1], scales to [0, 255], rounds, and encodes as hex.
    ///
    /// NaN channels quantize to 0.
    pub fn to_hex(self) -> HexColor {
        HexColor::from_rgb8(self.to_rgb8())
    }

    /// Quantizes to 8-bit channels with clamping and rounding.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// Removes sRGB gamma from one component.
pub fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to one linear component.
pub fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Linear RGB to XYZ through the D65 sRGB matrix, scaled by 100.
pub fn linear_to_xyz(c: LinearRgb) -> Xyz {
    Xyz::from_vec(SRGB_TO_XYZ * DVec3::new(c.r, c.g, c.b) * 100.0)
}

/// XYZ (white Y = 100) to linear RGB through the inverse D65 matrix.
///
/// The result is not clamped; out-of-gamut colors have components outside
/// [0, 1].
pub fn xyz_to_linear(c: Xyz) -> LinearRgb {
    let v = XYZ_TO_SRGB * (c.to_vec() / 100.0);
    LinearRgb {
        r: v.x,
        g: v.y,
        b: v.z,
    }
}
