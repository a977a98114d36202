//! Mapping canvas points back to cells.

use chipfield_core::color::HexColor;
use glam::DVec2;
use serde::Serialize;

use crate::pass::{RenderPass, RenderedCell};

/// The cell under a queried point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    /// Index of the cell center in the point field.
    pub cell: usize,
    pub palette_index: usize,
    pub color: HexColor,
}

impl From<&RenderedCell> for Hit {
    fn from(cell: &RenderedCell) -> Self {
        Self {
            cell: cell.index,
            palette_index: cell.palette_index,
            color: cell.color.clone(),
        }
    }
}

/// Answers "which chip is at (x, y)?" for a finished render pass.
pub struct CellHitTester<'a> {
    pass: &'a RenderPass,
}

impl<'a> CellHitTester<'a> {
    pub fn new(pass: &'a RenderPass) -> Self {
        Self { pass }
    }

    /// Cell whose center is nearest to `p`.
    ///
    /// By the Voronoi property this is the cell containing `p`. Ties go to
    /// the lower cell index. `None` outside the canvas or when the pass has
    /// no cells.
    pub fn hit(&self, p: DVec2) -> Option<Hit> {
        if !self.in_canvas(p) {
            return None;
        }
        let mut best: Option<(&RenderedCell, f64)> = None;
        for cell in &self.pass.cells {
            let d = cell.center.distance_squared(p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((cell, d));
            }
        }
        best.map(|(cell, _)| Hit::from(cell))
    }

    /// First cell whose polygon contains `p` (even-odd test).
    ///
    /// Slower than [`hit`](Self::hit) but independent of the Voronoi
    /// property, so it also works for polygons a host tessellator altered.
    pub fn hit_polygon(&self, p: DVec2) -> Option<Hit> {
        if !self.in_canvas(p) {
            return None;
        }
        self.pass
            .cells
            .iter()
            .find(|cell| polygon_contains(&cell.polygon, p))
            .map(Hit::from)
    }

    fn in_canvas(&self, p: DVec2) -> bool {
        p.is_finite()
            && p.x >= 0.0
            && p.y >= 0.0
            && p.x <= self.pass.width as f64
            && p.y <= self.pass.height as f64
    }
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(polygon: &[DVec2], p: DVec2) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
