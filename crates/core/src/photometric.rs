//! Photometric transform: how a chip color looks under a given light.
//!
//! The pipeline decodes a hex color, linearizes it, moves it into CIE XYZ,
//! then either applies the light's direct matrix (narrow-band sources) or a
//! Bradford chromatic adaptation from D65 to the light's white point, and
//! finally re-encodes to an sRGB hex color with clamping.
//!
//! Faults never propagate to the caller of [`transform`]: a zero cone
//! response in the adaptation returns the input color unchanged, and any
//! non-finite intermediate value degrades to black.

use glam::DVec3;

use crate::cache::{EvictionPolicy, TransformCache, DEFAULT_CAPACITY};
use crate::color::{
    linear_to_srgb, linear_to_xyz, srgb_to_linear, xyz_to_linear, HexColor, Srgb, Xyz,
};
use crate::error::ChipfieldError;
use crate::light::LightSource;
use crate::matrix::{BRADFORD, BRADFORD_INV};
use crate::palette::Palette;

/// Bradford adaptation of `sample` from the D65 white to `target`.
///
/// Returns `ChipfieldError::DegenerateTransform` if the D65 white has a
/// zero cone response, which would divide by zero.
pub fn bradford_adapt(sample: Xyz, target: Xyz) -> Result<Xyz, ChipfieldError> {
    adapt_between(sample, Xyz::D65, target)
}

/// Bradford adaptation of `sample` from white `source` to white `target`.
pub fn adapt_between(sample: Xyz, source: Xyz, target: Xyz) -> Result<Xyz, ChipfieldError> {
    let source_lms = BRADFORD * source.to_vec();
    if source_lms.to_array().iter().any(|&c| c == 0.0) {
        return Err(ChipfieldError::DegenerateTransform(format!(
            "source white {source:?} has a zero cone response"
        )));
    }
    let target_lms = BRADFORD * target.to_vec();
    let scale = target_lms / source_lms;
    let adapted: DVec3 = BRADFORD_INV * (scale * (BRADFORD * sample.to_vec()));
    Ok(Xyz::from_vec(adapted))
}

fn ensure_finite(stage: &str, values: &[f64]) -> Result<(), ChipfieldError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ChipfieldError::NumericOverflow(format!(
            "non-finite value after {stage}: {values:?}"
        )))
    }
}

/// Runs the full pipeline and reports faults instead of recovering.
///
/// The identity light returns `hex` untouched without running the
/// pipeline.
pub fn try_transform(hex: &HexColor, light: &LightSource) -> Result<HexColor, ChipfieldError> {
    if light.is_identity() {
        return Ok(hex.clone());
    }

    let linear = srgb_to_linear(Srgb::from_hex(hex));
    let xyz = linear_to_xyz(linear);
    ensure_finite("rgb to xyz", &[xyz.x, xyz.y, xyz.z])?;

    let lit = match &light.transform_matrix {
        Some(m) => Xyz::from_vec(*m * xyz.to_vec()),
        None => bradford_adapt(xyz, light.white_point)?,
    };
    ensure_finite("light transform", &[lit.x, lit.y, lit.z])?;

    let out = linear_to_srgb(xyz_to_linear(lit));
    ensure_finite("gamma encode", &[out.r, out.g, out.b])?;
    Ok(out.to_hex())
}

/// Transforms `hex` as seen under `light`, recovering from every fault.
///
/// `DegenerateTransform` yields the original color; `NumericOverflow`
/// yields `#000000` and logs a warning.
pub fn transform(hex: &HexColor, light: &LightSource) -> HexColor {
    match try_transform(hex, light) {
        Ok(out) => out,
        Err(ChipfieldError::DegenerateTransform(reason)) => {
            log::debug!("skipping adaptation of {hex} under '{}': {reason}", light.id);
            hex.clone()
        }
        Err(err) => {
            log::warn!("transform of {hex} under '{}' failed: {err}", light.id);
            HexColor::black()
        }
    }
}

/// Memoizing front end for [`transform`].
///
/// Owns its [`TransformCache`]; a render context holds one engine, so there
/// is no process-wide mutable state. Hosts that render from several threads
/// give each thread its own engine or put it behind a lock.
#[derive(Debug, Clone, Default)]
pub struct PhotometricEngine {
    cache: TransformCache,
}

impl PhotometricEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom cache bound and policy.
    pub fn with_cache(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            cache: TransformCache::new(capacity, policy),
        }
    }

    /// Creates an engine whose cache refreshes entries on lookup.
    pub fn lru() -> Self {
        Self::with_cache(DEFAULT_CAPACITY, EvictionPolicy::LeastRecentlyUsed)
    }

    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }

    /// Cached [`transform`].
    pub fn transform(&mut self, hex: &HexColor, light: &LightSource) -> HexColor {
        if let Some(hit) = self.cache.get(hex, &light.id) {
            return hit;
        }
        let out = transform(hex, light);
        self.cache.insert(hex.clone(), &light.id, out.clone());
        out
    }

    /// Transforms every palette color under `light`, preserving order.
    pub fn recolor_palette(&mut self, palette: &Palette, light: &LightSource) -> Vec<HexColor> {
        palette
            .colors()
            .iter()
            .map(|c| self.transform(&c.hex, light))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{natural, resolve, SpectralProfile};

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn assert_within(actual: &HexColor, expected: &HexColor, tol: i16) {
        let a = actual.rgb8();
        let e = expected.rgb8();
        for ch in 0..3 {
            let diff = (a[ch] as i16 - e[ch] as i16).abs();
            assert!(
                diff <= tol,
                "channel {ch}: {actual} vs {expected} differs by {diff}"
            );
        }
    }

    #[test]
    fn natural_light_is_exact_identity() {
        assert_eq!(transform(&hex("#808080"), natural()), hex("#808080"));
        assert_eq!(transform(&hex("#123456"), natural()), hex("#123456"));
    }

    #[test]
    fn d65_light_is_near_identity() {
        let d65 = resolve("d65").unwrap();
        for s in ["#808080", "#FF0000", "#00FF00", "#0000FF", "#C0FFEE", "#000000", "#FFFFFF"] {
            assert_within(&transform(&hex(s), d65), &hex(s), 1);
        }
    }

    #[test]
    fn round_trip_through_d65_and_its_inverse() {
        let d65 = resolve("d65").unwrap();
        let inverse = LightSource::inverse_of(d65).unwrap();
        for s in ["#808080", "#A0522D", "#6A7B8C", "#2E8B57"] {
            let there = transform(&hex(s), d65);
            let back = transform(&there, &inverse);
            assert_within(&back, &hex(s), 2);
        }
    }

    #[test]
    fn round_trip_through_warm_light_and_its_inverse() {
        let d50 = resolve("d50").unwrap();
        let inverse = LightSource::inverse_of(d50).unwrap();
        for s in ["#808080", "#A0522D", "#6A7B8C", "#9999CC"] {
            let there = transform(&hex(s), d50);
            let back = transform(&there, &inverse);
            assert_within(&back, &hex(s), 2);
        }
    }

    #[test]
    fn incandescent_gray_round_trips() {
        let a = resolve("incandescent").unwrap();
        let inverse = LightSource::inverse_of(a).unwrap();
        let back = transform(&transform(&hex("#808080"), a), &inverse);
        assert_within(&back, &hex("#808080"), 2);
    }

    #[test]
    fn incandescent_warms_white() {
        let out = transform(&hex("#FFFFFF"), resolve("incandescent").unwrap()).rgb8();
        assert!(out[0] > out[2], "expected red > blue, got {out:?}");
    }

    #[test]
    fn red_led_removes_green_and_blue() {
        let out = transform(&hex("#FFFFFF"), resolve("red-led-660").unwrap()).rgb8();
        assert!(out[0] >= 254, "red channel {}", out[0]);
        assert!(out[1] <= 1 && out[2] <= 1, "got {out:?}");
        let green = transform(&hex("#00FF00"), resolve("red-led-660").unwrap());
        assert_eq!(green, hex("#000000"));
    }

    #[test]
    fn zero_cone_responses_are_handled() {
        let bad = LightSource::continuous(
            "void",
            "Void",
            Xyz::new(0.0, 0.0, 0.0),
            None,
            SpectralProfile::Continuous,
        );
        // Zero target white: adaptation runs and collapses to black rather
        // than dividing by zero.
        assert_eq!(transform(&hex("#336699"), &bad), hex("#000000"));

        let sample = Xyz::new(20.0, 20.0, 20.0);
        let result = adapt_between(sample, Xyz::new(0.0, 0.0, 0.0), Xyz::D65);
        assert!(matches!(result, Err(ChipfieldError::DegenerateTransform(_))));
    }

    #[test]
    fn non_finite_white_point_degrades_to_black() {
        let broken = LightSource::continuous(
            "broken",
            "Broken",
            Xyz::new(f64::NAN, 100.0, 100.0),
            None,
            SpectralProfile::Continuous,
        );
        assert!(matches!(
            try_transform(&hex("#336699"), &broken),
            Err(ChipfieldError::NumericOverflow(_))
        ));
        assert_eq!(transform(&hex("#336699"), &broken), hex("#000000"));
    }

    #[test]
    fn non_finite_matrix_degrades_to_black() {
        let mut broken = resolve("sodium-vapor").unwrap().clone();
        broken.id = "broken-matrix".into();
        broken.transform_matrix = Some(glam::DMat3::from_diagonal(DVec3::new(
            f64::INFINITY,
            1.0,
            1.0,
        )));
        assert_eq!(transform(&hex("#FFFFFF"), &broken), hex("#000000"));
    }

    #[test]
    fn engine_caches_results() {
        let mut engine = PhotometricEngine::new();
        let a = resolve("incandescent").unwrap();
        let first = engine.transform(&hex("#336699"), a);
        assert_eq!(engine.cache().len(), 1);
        let second = engine.transform(&hex("#336699"), a);
        assert_eq!(first, second);
        assert_eq!(engine.cache().len(), 1);
        assert_eq!(first, transform(&hex("#336699"), a));
    }

    #[test]
    fn engine_cache_stays_bounded() {
        let mut engine = PhotometricEngine::new();
        let lights = [resolve("d50").unwrap(), resolve("fluorescent").unwrap()];
        for i in 0..700u32 {
            for light in lights {
                let h = HexColor::from_rgb8([(i % 256) as u8, (i / 256) as u8, 17]);
                engine.transform(&h, light);
            }
        }
        assert!(engine.cache().len() <= DEFAULT_CAPACITY);
        assert_eq!(engine.cache().len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn recolor_palette_preserves_order() {
        let palette = Palette::from_pairs(&[("#FFFFFF", 1.0), ("#000000", 2.0)]).unwrap();
        let mut engine = PhotometricEngine::lru();
        let out = engine.recolor_palette(&palette, natural());
        assert_eq!(out, vec![hex("#FFFFFF"), hex("#000000")]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn transform_never_panics_and_is_deterministic(r: u8, g: u8, b: u8, idx in 0usize..9) {
                let light = &crate::light::STANDARD_LIGHTS[idx];
                let h = HexColor::from_rgb8([r, g, b]);
                let once = transform(&h, light);
                let twice = transform(&h, light);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
