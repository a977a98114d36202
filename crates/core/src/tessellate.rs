//! The seam between point fields and cell polygons.
//!
//! A [`Tessellator`] turns cell centers into one clipped Voronoi polygon per
//! center. The core never triangulates; hosts plug in any conforming
//! planar-Voronoi implementation.

use glam::DVec2;

/// Axis-aligned rectangle `[min, max]` cells are clipped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// `[0, width] × [0, height]`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Corners in winding order, starting at `min`.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Ordered vertex list of one cell.
pub type Polygon = Vec<DVec2>;

/// Computes the Voronoi diagram of `points` clipped to `bounds`.
///
/// Returns exactly one entry per input point, in input order. `None` marks a
/// site with no cell inside the bounds (or one the implementation could not
/// place, such as a coincident duplicate).
pub trait Tessellator {
    fn tessellate(&self, points: &[DVec2], bounds: Bounds) -> Vec<Option<Polygon>>;
}

/// Signed area of a polygon (shoelace formula).
pub fn signed_area(polygon: &[DVec2]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum();
    twice / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_size() {
        let b = Bounds::from_size(640.0, 480.0);
        assert_eq!(b.width(), 640.0);
        assert_eq!(b.height(), 480.0);
        assert!(b.contains(DVec2::new(640.0, 0.0)));
        assert!(!b.contains(DVec2::new(640.1, 0.0)));
    }

    #[test]
    fn corners_area_matches_rectangle() {
        let b = Bounds::from_size(30.0, 20.0);
        assert_eq!(signed_area(&b.corners()).abs(), 600.0);
    }

    #[test]
    fn degenerate_polygons_have_zero_area() {
        assert_eq!(signed_area(&[]), 0.0);
        assert_eq!(signed_area(&[DVec2::ZERO, DVec2::ONE]), 0.0);
    }
}
