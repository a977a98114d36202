//! Light sources and the process-wide light registry.
//!
//! Continuous-spectrum sources are described by their white point and are
//! applied through Bradford chromatic adaptation. Narrow-band sources
//! (sodium vapor, single-wavelength LEDs) cannot be modelled by adapting a
//! white point, so they carry a direct XYZ → XYZ matrix instead.

use glam::DMat3;
use once_cell::sync::Lazy;

use crate::color::Xyz;
use crate::error::ChipfieldError;
use crate::matrix::{
    checked_inverse, outer, to_rows, BRADFORD, BRADFORD_INV, SRGB_TO_XYZ, XYZ_TO_SRGB,
};

/// Reserved id of the identity light.
pub const NATURAL_ID: &str = "natural";

/// Shape of a light source's emission spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralProfile {
    Continuous,
    Narrow,
    Mixed,
}

impl SpectralProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            SpectralProfile::Continuous => "continuous",
            SpectralProfile::Narrow => "narrow",
            SpectralProfile::Mixed => "mixed",
        }
    }
}

/// A light source a colorway can be viewed under.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub id: String,
    pub name: String,
    pub white_point: Xyz,
    /// Correlated color temperature in Kelvin, when meaningful.
    pub color_temperature: Option<f64>,
    pub spectral_profile: SpectralProfile,
    /// Direct XYZ → XYZ transform; takes precedence over adaptation.
    pub transform_matrix: Option<DMat3>,
}

impl LightSource {
    /// A continuous-spectrum source adapted through its white point.
    pub fn continuous(
        id: &str,
        name: &str,
        white_point: Xyz,
        color_temperature: Option<f64>,
        spectral_profile: SpectralProfile,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            white_point,
            color_temperature,
            spectral_profile,
            transform_matrix: None,
        }
    }

    /// True for the reserved `natural` light, which never alters a color.
    pub fn is_identity(&self) -> bool {
        self.id == NATURAL_ID
    }

    /// Builds the light whose adaptation undoes this light's adaptation.
    ///
    /// Adaptation always starts from D65 and scales each cone response by
    /// `target / D65`, so the inverse white point has cone response
    /// `D65² / target`. A matrix light inverts its matrix instead.
    ///
    /// Returns `ChipfieldError::DegenerateTransform` when the white point has
    /// a zero cone response or the matrix is singular (every narrow-band
    /// source is, since it collapses colors onto one line).
    pub fn inverse_of(light: &LightSource) -> Result<LightSource, ChipfieldError> {
        let transform_matrix = match &light.transform_matrix {
            Some(m) => Some(checked_inverse(m).ok_or_else(|| {
                ChipfieldError::DegenerateTransform(format!(
                    "matrix of light '{}' is singular",
                    light.id
                ))
            })?),
            None => None,
        };

        let d65 = BRADFORD * Xyz::D65.to_vec();
        let target = BRADFORD * light.white_point.to_vec();
        if target.to_array().iter().any(|&c| c == 0.0) {
            return Err(ChipfieldError::DegenerateTransform(format!(
                "white point of light '{}' has a zero cone response",
                light.id
            )));
        }
        let white_point = Xyz::from_vec(BRADFORD_INV * (d65 * d65 / target));

        Ok(LightSource {
            id: format!("{}-inverse", light.id),
            name: format!("Inverse of {}", light.name),
            white_point,
            color_temperature: None,
            spectral_profile: light.spectral_profile,
            transform_matrix,
        })
    }
}

/// Builds a narrow-band matrix: linear-RGB response `response` drives a
/// reflected stimulus with chromaticity `(x, y)` at relative brightness
/// `gain`.
fn narrow_band(x: f64, y: f64, gain: f64, response: [f64; 3]) -> DMat3 {
    let rows = to_rows(&XYZ_TO_SRGB);
    let row = [0, 1, 2].map(|j| {
        response[0] * rows[0][j] + response[1] * rows[1][j] + response[2] * rows[2][j]
    });
    let col = [gain * x / y, gain, gain * (1.0 - x - y) / y];
    outer(col, row)
}

/// Builds a white point with Y = 100 from chromaticity coordinates.
fn white_from_xy(x: f64, y: f64) -> Xyz {
    Xyz::new(x / y * 100.0, 100.0, (1.0 - x - y) / y * 100.0)
}

/// Light registry, immutable after first use.
pub static STANDARD_LIGHTS: Lazy<Vec<LightSource>> = Lazy::new(|| {
    use SpectralProfile::*;

    // 660 nm LED: only the red channel of a surface is lit, reflected back
    // as the sRGB red primary.
    let red_primary = to_rows(&SRGB_TO_XYZ).map(|row| row[0]);
    let red_row = to_rows(&XYZ_TO_SRGB)[0];
    let red_led = outer(red_primary, red_row);

    vec![
        LightSource::continuous(NATURAL_ID, "Natural", Xyz::D65, Some(6504.0), Continuous),
        LightSource::continuous("d65", "Daylight (D65)", Xyz::D65, Some(6504.0), Continuous),
        LightSource::continuous(
            "d50",
            "Horizon daylight (D50)",
            Xyz::new(96.422, 100.0, 82.521),
            Some(5003.0),
            Continuous,
        ),
        LightSource::continuous(
            "incandescent",
            "Incandescent (CIE A)",
            Xyz::new(109.850, 100.0, 35.585),
            Some(2856.0),
            Continuous,
        ),
        LightSource::continuous(
            "fluorescent",
            "Cool white fluorescent (F2)",
            Xyz::new(99.187, 100.0, 67.395),
            Some(4230.0),
            Mixed,
        ),
        LightSource::continuous(
            "tl84",
            "Tri-band fluorescent (F11)",
            Xyz::new(100.966, 100.0, 64.370),
            Some(4000.0),
            Mixed,
        ),
        LightSource::continuous(
            "candlelight",
            "Candlelight",
            white_from_xy(0.5266, 0.4133),
            Some(1900.0),
            Continuous,
        ),
        LightSource {
            id: "sodium-vapor".to_string(),
            name: "Low-pressure sodium (589 nm)".to_string(),
            white_point: white_from_xy(0.5752, 0.4242),
            color_temperature: Some(1800.0),
            spectral_profile: Narrow,
            transform_matrix: Some(narrow_band(0.5752, 0.4242, 0.35, [0.7, 0.3, 0.0])),
        },
        LightSource {
            id: "red-led-660".to_string(),
            name: "Red LED (660 nm)".to_string(),
            white_point: Xyz::new(264.96, 100.0, 0.0),
            color_temperature: None,
            spectral_profile: Narrow,
            transform_matrix: Some(red_led),
        },
    ]
});

/// Looks up a light by id.
pub fn find(id: &str) -> Option<&'static LightSource> {
    STANDARD_LIGHTS.iter().find(|l| l.id == id)
}

/// Looks up a light by id, failing with `ChipfieldError::UnknownLight`.
pub fn resolve(id: &str) -> Result<&'static LightSource, ChipfieldError> {
    find(id).ok_or_else(|| ChipfieldError::UnknownLight(id.to_string()))
}

/// The reserved identity light.
pub fn natural() -> &'static LightSource {
    &STANDARD_LIGHTS[0]
}

/// Ids of every registered light, in registry order.
pub fn list_ids() -> Vec<&'static str> {
    STANDARD_LIGHTS.iter().map(|l| l.id.as_str()).collect()
}
