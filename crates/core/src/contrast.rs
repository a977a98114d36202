//! Luminance and text-color selection for labels drawn over chip colors.
//!
//! `text_color_for` uses a plain 0.5 luminance cutoff, not the WCAG
//! contrast-ratio test. [`contrast_ratio`] is provided for tooling that
//! wants the WCAG figure.

use crate::color::{srgb_to_linear, HexColor, Srgb};

/// Text color used on light backgrounds.
pub const DARK_TEXT: &str = "#000000";
/// Text color used on dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Relative luminance of a color, in [0, 1].
pub fn relative_luminance(hex: &HexColor) -> f64 {
    let lin = srgb_to_linear(Srgb::from_hex(hex));
    0.2126 * lin.r + 0.7152 * lin.g + 0.0722 * lin.b
}

/// Dark text when luminance is above 0.5, light text otherwise.
pub fn text_color_for(hex: &HexColor) -> &'static str {
    if relative_luminance(hex) > 0.5 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// WCAG contrast ratio `(L1 + 0.05) / (L2 + 0.05)`, lighter over darker.
pub fn contrast_ratio(a: &HexColor, b: &HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}
