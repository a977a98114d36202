//! PNG output of a rendered [`PixelBuffer`].
//!
//! Feature-gated behind `png` (default on) so embedders that bring their own
//! surface do not pull in the `image` crate.

use std::path::Path;

use chipfield_core::error::ChipfieldError;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::raster::PixelBuffer;

fn to_image(buffer: &PixelBuffer) -> Result<RgbaImage, ChipfieldError> {
    let w = u32::try_from(buffer.width()).map_err(|_| ChipfieldError::InvalidDimensions)?;
    let h = u32::try_from(buffer.height()).map_err(|_| ChipfieldError::InvalidDimensions)?;
    RgbaImage::from_raw(w, h, buffer.rgba().to_vec())
        .ok_or_else(|| ChipfieldError::Io("RGBA buffer size mismatch".into()))
}

/// Writes the buffer as a PNG at its native size.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<(), ChipfieldError> {
    to_image(buffer)?
        .save(path)
        .map_err(|e| ChipfieldError::Io(e.to_string()))
}

/// Writes the buffer enlarged by `factor`.
///
/// The buffer's smoothing flag picks the filter: bilinear when on, nearest
/// neighbour when off so dense fields keep crisp chip edges.
pub fn write_png_scaled(
    buffer: &PixelBuffer,
    path: &Path,
    factor: u32,
) -> Result<(), ChipfieldError> {
    if factor <= 1 {
        return write_png(buffer, path);
    }
    let img = to_image(buffer)?;
    let w = img
        .width()
        .checked_mul(factor)
        .ok_or(ChipfieldError::InvalidDimensions)?;
    let h = img
        .height()
        .checked_mul(factor)
        .ok_or(ChipfieldError::InvalidDimensions)?;
    let filter = if buffer.smoothing() {
        FilterType::Triangle
    } else {
        FilterType::Nearest
    };
    imageops::resize(&img, w, h, filter)
        .save(path)
        .map_err(|e| ChipfieldError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Surface;
    use chipfield_core::color::HexColor;

    #[test]
    fn write_png_round_trip() {
        let mut buffer = PixelBuffer::new(16, 8).unwrap();
        buffer.clear(&HexColor::parse("#3366CC").unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");

        write_png(&buffer, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 8);
        assert_eq!(img.get_pixel(3, 3).0, [0x33, 0x66, 0xCC, 255]);
    }

    #[test]
    fn scaled_output_multiplies_dimensions() {
        let mut buffer = PixelBuffer::new(10, 5).unwrap();
        buffer.set_smoothing(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");

        write_png_scaled(&buffer, &path, 3).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (30, 15));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let buffer = PixelBuffer::new(2, 2).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        assert!(matches!(write_png(&buffer, &path), Err(ChipfieldError::Io(_))));
    }
}
