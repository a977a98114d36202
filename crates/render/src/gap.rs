//! Seam-free polygon preparation.
//!
//! Adjacent cells share edges exactly, but filling them one at a time leaves
//! hairline seams where neither fill covers a pixel. Each cell is grown
//! slightly about its own centroid before filling, and every vertex is
//! snapped to a whole pixel so repeated fills never anti-alias against each
//! other. Seams get more visible as cells shrink, so growth scales with the
//! cell count.

use chipfield_core::points::MAX_CELLS;
use glam::{DVec2, IVec2};

/// Expansion at `MAX_CELLS`.
pub const MAX_EXPANSION: f64 = 0.2;
/// Smoothing is turned off at and above this many cells.
pub const SMOOTHING_CUTOFF: usize = 8000;

/// `(cell_count / 10000) * 0.2`.
pub fn expansion_factor(cell_count: usize) -> f64 {
    cell_count as f64 / MAX_CELLS as f64 * MAX_EXPANSION
}

/// Whether the surface should interpolate when scaled.
pub fn smoothing_enabled(cell_count: usize) -> bool {
    cell_count < SMOOTHING_CUTOFF
}

/// Area-weighted centroid, falling back to the vertex mean for polygons
/// with (near) zero area. `None` for an empty polygon.
pub fn polygon_centroid(polygon: &[DVec2]) -> Option<DVec2> {
    let n = polygon.len();
    if n == 0 {
        return None;
    }
    let mean = polygon.iter().copied().sum::<DVec2>() / n as f64;
    if n < 3 {
        return Some(mean);
    }

    let mut twice_area = 0.0;
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.perp_dot(b);
        twice_area += cross;
        acc += (a + b) * cross;
    }
    if twice_area.abs() < 1e-9 {
        return Some(mean);
    }
    Some(acc / (3.0 * twice_area))
}

/// Scales every vertex away from the centroid: `c + (v - c) * (1 + factor)`.
pub fn expand_polygon(polygon: &[DVec2], factor: f64) -> Vec<DVec2> {
    let Some(c) = polygon_centroid(polygon) else {
        return Vec::new();
    };
    polygon.iter().map(|&v| c + (v - c) * (1.0 + factor)).collect()
}

/// Expanded polygon with vertices rounded to the nearest pixel.
pub fn pixel_path(polygon: &[DVec2], cell_count: usize) -> Vec<IVec2> {
    expand_polygon(polygon, expansion_factor(cell_count))
        .into_iter()
        .map(|v| v.round().as_ivec2())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(x0, y0),
            DVec2::new(x0 + size, y0),
            DVec2::new(x0 + size, y0 + size),
            DVec2::new(x0, y0 + size),
        ]
    }

    #[test]
    fn expansion_factor_scales_with_density() {
        assert_eq!(expansion_factor(0), 0.0);
        assert!((expansion_factor(100) - 0.002).abs() < 1e-12);
        assert!((expansion_factor(5000) - 0.1).abs() < 1e-12);
        assert!((expansion_factor(10_000) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn smoothing_turns_off_at_8000_cells() {
        assert!(smoothing_enabled(7999));
        assert!(!smoothing_enabled(8000));
        assert!(!smoothing_enabled(10_000));
    }

    #[test]
    fn centroid_of_square_is_its_center() {
        let c = polygon_centroid(&square(10.0, 20.0, 4.0)).unwrap();
        assert!((c - DVec2::new(12.0, 22.0)).length() < 1e-12);
    }

    #[test]
    fn centroid_is_area_weighted() {
        // Extra vertices on one edge shift the vertex mean but not the
        // area centroid.
        let poly = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        let c = polygon_centroid(&poly).unwrap();
        assert!((c - DVec2::new(2.0, 2.0)).length() < 1e-12, "{c:?}");
    }

    #[test]
    fn centroid_of_degenerate_polygon_is_vertex_mean() {
        let line = vec![DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0), DVec2::new(4.0, 0.0)];
        assert_eq!(polygon_centroid(&line), Some(DVec2::new(2.0, 0.0)));
        assert_eq!(polygon_centroid(&[]), None);
    }

    #[test]
    fn expand_grows_about_centroid() {
        let grown = expand_polygon(&square(0.0, 0.0, 10.0), 0.2);
        assert!((grown[0] - DVec2::new(-1.0, -1.0)).length() < 1e-12);
        assert!((grown[2] - DVec2::new(11.0, 11.0)).length() < 1e-12);
    }

    #[test]
    fn zero_factor_is_identity() {
        let poly = square(3.0, 4.0, 5.0);
        let same = expand_polygon(&poly, 0.0);
        for (a, b) in poly.iter().zip(&same) {
            assert!((*a - *b).length() < 1e-12);
        }
    }

    #[test]
    fn pixel_path_rounds_to_integers() {
        let poly = vec![
            DVec2::new(0.4, 0.6),
            DVec2::new(10.49, 0.2),
            DVec2::new(5.5, 9.7),
        ];
        let path = pixel_path(&poly, 0);
        assert_eq!(path, vec![IVec2::new(0, 1), IVec2::new(10, 0), IVec2::new(6, 10)]);
    }

    #[test]
    fn pixel_path_of_empty_polygon_is_empty() {
        assert!(pixel_path(&[], 5000).is_empty());
    }
}
