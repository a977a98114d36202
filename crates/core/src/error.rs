//! Error types for the chipfield core.

use thiserror::Error;

/// Errors produced by chipfield operations.
#[derive(Debug, Error, PartialEq)]
pub enum ChipfieldError {
    /// A color string was not a 6-digit hex color.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// A palette entry had a negative, NaN, or infinite density.
    #[error("invalid density {value} for palette entry {index}")]
    InvalidDensity { index: usize, value: f64 },

    /// A palette edit named an entry that does not exist.
    #[error("index {index} out of range for palette of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Sampling was attempted with zero colors.
    #[error("cannot sample from an empty palette")]
    EmptyPalette,

    /// Chromatic adaptation would divide by zero.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    /// A non-finite value appeared mid-pipeline.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),

    /// A light source id was not found in the registry.
    #[error("unknown light source: {0}")]
    UnknownLight(String),

    /// A built-in palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The cell-density scale was outside [0.1, 4.0] or not finite.
    #[error("invalid scale {0}: expected a value in [0.1, 4.0]")]
    InvalidScale(f64),

    /// File or surface output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hex_includes_input() {
        let err = ChipfieldError::InvalidHex("#12".into());
        let msg = format!("{err}");
        assert!(msg.contains("#12"), "missing input in: {msg}");
    }

    #[test]
    fn invalid_density_includes_index_and_value() {
        let err = ChipfieldError::InvalidDensity {
            index: 3,
            value: -1.5,
        };
        let msg = format!("{err}");
        assert!(msg.contains('3'), "missing index in: {msg}");
        assert!(msg.contains("-1.5"), "missing value in: {msg}");
    }

    #[test]
    fn index_out_of_range_includes_index_and_len() {
        let msg = ChipfieldError::IndexOutOfRange { index: 7, len: 2 }.to_string();
        assert!(msg.contains('7') && msg.contains('2'), "got: {msg}");
    }

    #[test]
    fn empty_palette_displays_readable_message() {
        let msg = format!("{}", ChipfieldError::EmptyPalette);
        assert!(msg.contains("empty"), "got: {msg}");
    }

    #[test]
    fn unknown_light_includes_id() {
        let err = ChipfieldError::UnknownLight("blacklight".into());
        assert!(err.to_string().contains("blacklight"));
    }

    #[test]
    fn invalid_scale_includes_value() {
        let err = ChipfieldError::InvalidScale(9.5);
        assert!(err.to_string().contains("9.5"));
    }

    #[test]
    fn chipfield_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChipfieldError>();
    }

    #[test]
    fn chipfield_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ChipfieldError>();
    }
}
