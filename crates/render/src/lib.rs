#![deny(unsafe_code)]
//! Geometry and raster half of chipfield.
//!
//! Turns a `FieldSpec` into pixels: Voronoi cells from a `spade`
//! triangulation, seam-free polygon expansion, a CPU scanline surface, the
//! render pass that ties sampling and lighting together, hit testing over a
//! finished pass, and PNG snapshots.

pub mod gap;
pub mod hit;
pub mod pass;
pub mod raster;
pub mod voronoi;

#[cfg(feature = "png")]
pub mod snapshot;

pub use hit::{CellHitTester, Hit};
pub use pass::{RenderContext, RenderPass, RenderedCell, NEUTRAL_FILL};
pub use raster::{PixelBuffer, Surface};
pub use voronoi::DelaunayTessellator;
