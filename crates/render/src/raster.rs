//! Drawing surfaces and the CPU pixel buffer.
//!
//! The render pass only ever clears a surface and fills closed polygons, so
//! [`Surface`] is that small. [`PixelBuffer`] is the built-in RGBA8 target
//! used by the CLI and the PNG snapshot path; hosts with their own canvas
//! implement the trait directly.

use chipfield_core::color::HexColor;
use chipfield_core::error::ChipfieldError;
use glam::IVec2;

/// A 2-D target that can be cleared and filled with solid polygons.
pub trait Surface {
    /// Whether scaled output should interpolate (`true`) or stay blocky.
    fn set_smoothing(&mut self, enabled: bool);
    fn clear(&mut self, color: &HexColor);
    /// Fills the closed polygon through `path` with the even-odd rule.
    fn fill_polygon(&mut self, color: &HexColor, path: &[IVec2]);
}

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
    smoothing: bool,
}

impl PixelBuffer {
    /// Creates an opaque black buffer.
    ///
    /// Returns `ChipfieldError::InvalidDimensions` if either side is zero or
    /// the byte length overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, ChipfieldError> {
        if width == 0 || height == 0 {
            return Err(ChipfieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(ChipfieldError::InvalidDimensions)?;
        let mut data = vec![0u8; len];
        data.chunks_exact_mut(4).for_each(|px| px[3] = 255);
        Ok(Self {
            width,
            height,
            data,
            smoothing: true,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn rgba(&self) -> &[u8] {
        &self.data
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// RGB of one pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    fn fill_span(&mut self, y: usize, x0: usize, x1: usize, rgb: [u8; 3]) {
        let row = y * self.width;
        for px in self.data[(row + x0) * 4..(row + x1) * 4].chunks_exact_mut(4) {
            px[..3].copy_from_slice(&rgb);
            px[3] = 255;
        }
    }
}

impl Surface for PixelBuffer {
    fn set_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }

    fn clear(&mut self, color: &HexColor) {
        let rgb = color.rgb8();
        for px in self.data.chunks_exact_mut(4) {
            px[..3].copy_from_slice(&rgb);
            px[3] = 255;
        }
    }

    fn fill_polygon(&mut self, color: &HexColor, path: &[IVec2]) {
        let rgb = color.rgb8();
        let (width, height) = (self.width, self.height);
        scan_spans(path, width, height, |y, x0, x1| self.fill_span(y, x0, x1, rgb));
    }
}

/// Walks the even-odd interior of `path` row by row, calling
/// `emit(y, x0, x1)` for each run of pixels `x0..x1` whose centers lie
/// inside. Spans are clipped to `width × height`.
pub fn scan_spans(
    path: &[IVec2],
    width: usize,
    height: usize,
    mut emit: impl FnMut(usize, usize, usize),
) {
    if path.len() < 3 {
        return;
    }
    let min_y = path.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = path.iter().map(|p| p.y).max().unwrap_or(0);
    let row_start = min_y.max(0) as usize;
    let row_end = (max_y.max(0) as usize).min(height);

    let mut crossings: Vec<f64> = Vec::with_capacity(path.len());
    for y in row_start..row_end {
        // Sample at pixel centers. An edge covers [y_lo, y_hi) so shared
        // vertices are counted once.
        let sy = y as f64 + 0.5;
        crossings.clear();
        for i in 0..path.len() {
            let a = path[i].as_dvec2();
            let b = path[(i + 1) % path.len()].as_dvec2();
            if (a.y <= sy) != (b.y <= sy) {
                crossings.push(a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            // Pixel x is inside when its center x + 0.5 lies in [xa, xb).
            let x0 = (pair[0] - 0.5).ceil().max(0.0) as usize;
            let x1 = ((pair[1] - 0.5).ceil().max(0.0) as usize).min(width);
            if x0 < x1 {
                emit(y, x0, x1);
            }
        }
    }
}

/// Tracks which pixels of a canvas some polygon fill has reached.
///
/// Uses the same sampling rule as [`PixelBuffer::fill_polygon`], so a pixel
/// left unmarked here is one no fill painted.
#[derive(Debug, Clone)]
pub struct CoverageMask {
    width: usize,
    height: usize,
    covered: Vec<bool>,
}

impl CoverageMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width.saturating_mul(height)],
        }
    }

    /// Marks every pixel `path` fills.
    pub fn mark(&mut self, path: &[IVec2]) {
        let (width, height) = (self.width, self.height);
        let covered = &mut self.covered;
        scan_spans(path, width, height, |y, x0, x1| {
            covered[y * width + x0..y * width + x1].fill(true);
        });
    }

    pub fn is_covered(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.covered[y * self.width + x]
    }

    /// Pixels no marked path reached, in row-major order.
    pub fn uncovered(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(move |(i, _)| (i % self.width, i / self.width))
    }
}
