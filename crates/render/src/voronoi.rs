//! Voronoi cells from a `spade` Delaunay triangulation.
//!
//! A site's Voronoi cell is the intersection of the half-planes closer to it
//! than to each of its Delaunay neighbours. Starting from the bounds
//! rectangle and clipping by one perpendicular bisector per neighbour gives
//! the clipped cell directly, with no unbounded edges to special-case.

use std::collections::HashSet;

use chipfield_core::tessellate::{Bounds, Polygon, Tessellator};
use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Consecutive vertices closer than this are merged after clipping.
const VERTEX_EPSILON: f64 = 1e-9;

/// [`Tessellator`] backed by `spade::DelaunayTriangulation`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelaunayTessellator;

impl Tessellator for DelaunayTessellator {
    fn tessellate(&self, points: &[DVec2], bounds: Bounds) -> Vec<Option<Polygon>> {
        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let handles: Vec<_> = points
            .iter()
            .enumerate()
            .map(|(i, p)| match triangulation.insert(Point2::new(p.x, p.y)) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    log::warn!("skipping site {i} at ({}, {}): {err:?}", p.x, p.y);
                    None
                }
            })
            .collect();

        // Coincident sites share a vertex; the first one owns the cell.
        let mut claimed = HashSet::with_capacity(handles.len());
        handles
            .iter()
            .zip(points)
            .map(|(handle, &site)| {
                let handle = (*handle)?;
                if !claimed.insert(handle) {
                    return None;
                }
                let vertex = triangulation.vertex(handle);
                let mut cell: Polygon = bounds.corners().to_vec();
                for edge in vertex.out_edges() {
                    let neighbour = edge.to().position();
                    cell = clip_half_plane(&cell, site, DVec2::new(neighbour.x, neighbour.y));
                    if cell.is_empty() {
                        break;
                    }
                }
                (cell.len() >= 3).then_some(cell)
            })
            .collect()
    }
}

/// Keeps the part of convex `polygon` closer to `site` than to `other`.
///
/// Sutherland–Hodgman against the perpendicular bisector of the two sites.
pub fn clip_half_plane(polygon: &[DVec2], site: DVec2, other: DVec2) -> Polygon {
    let normal = other - site;
    let mid = (site + other) * 0.5;
    let side = |v: DVec2| (v - mid).dot(normal);

    let n = polygon.len();
    let mut out: Polygon = Vec::with_capacity(n + 1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let (sa, sb) = (side(a), side(b));
        if sa <= 0.0 {
            out.push(a);
        }
        if (sa <= 0.0) != (sb <= 0.0) {
            let t = sa / (sa - sb);
            out.push(a + (b - a) * t);
        }
    }

    out.dedup_by(|b, a| a.distance_squared(*b) < VERTEX_EPSILON * VERTEX_EPSILON);
    if out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) < VERTEX_EPSILON * VERTEX_EPSILON {
        out.pop();
    }
    out
}
