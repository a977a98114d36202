//! One full render of a chip field onto a [`Surface`].
//!
//! [`RenderContext`] holds the editable field state (the [`FieldSpec`]), the
//! cached [`PointField`], and the photometric engine with its transform
//! cache. Palette, density, hex and light edits reuse the cached geometry.
//! Scale and size edits rebuild it with the same seed, and only
//! [`regenerate`](RenderContext::regenerate) picks a new seed.

use chipfield_core::color::HexColor;
use chipfield_core::error::ChipfieldError;
use chipfield_core::light;
use chipfield_core::palette::Palette;
use chipfield_core::photometric::PhotometricEngine;
use chipfield_core::points::{PointField, MAX_SCALE, MIN_SCALE};
use chipfield_core::prng::cell_seed;
use chipfield_core::sampler::draw_seeded_index;
use chipfield_core::seed::FieldSpec;
use chipfield_core::tessellate::{Bounds, Polygon, Tessellator};
use glam::{DVec2, IVec2};
use serde::Serialize;

use crate::gap::{pixel_path, smoothing_enabled};
use crate::raster::{CoverageMask, Surface};
use crate::voronoi::DelaunayTessellator;

/// Background shown where no cell is drawn.
pub const NEUTRAL_FILL: &str = "#808080";

/// A cell as drawn in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    /// Index of the cell center in the point field.
    pub index: usize,
    pub center: DVec2,
    /// Unexpanded Voronoi polygon.
    pub polygon: Polygon,
    pub palette_index: usize,
    /// Palette color after the light transform.
    pub color: HexColor,
}

/// Result of [`RenderContext::render`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPass {
    /// Size of the point field; zero when nothing was drawn.
    pub cell_count: usize,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub light: String,
    pub smoothing: bool,
    /// Cells with a polygon, in point-field order.
    pub cells: Vec<RenderedCell>,
}

/// Editable chip-field state plus the caches that make re-rendering cheap.
pub struct RenderContext<T: Tessellator = DelaunayTessellator> {
    spec: FieldSpec,
    field: Option<PointField>,
    engine: PhotometricEngine,
    tessellator: T,
}

impl RenderContext<DelaunayTessellator> {
    /// Creates a context using the built-in `spade` tessellator.
    pub fn new(spec: &FieldSpec) -> Result<Self, ChipfieldError> {
        Self::with_tessellator(spec, DelaunayTessellator)
    }
}

impl<T: Tessellator> RenderContext<T> {
    /// Creates a context with a host-supplied tessellator.
    ///
    /// Fails if `spec` does not validate.
    pub fn with_tessellator(spec: &FieldSpec, tessellator: T) -> Result<Self, ChipfieldError> {
        spec.validate()?;
        Ok(Self {
            spec: spec.clone(),
            field: None,
            engine: PhotometricEngine::new(),
            tessellator,
        })
    }

    /// Replaces the engine, e.g. to switch the cache policy.
    pub fn with_engine(mut self, engine: PhotometricEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn seed(&self) -> u64 {
        self.spec.seed
    }

    pub fn cell_count(&self) -> usize {
        self.spec.cell_count()
    }

    /// The cached point field, if a render has happened.
    pub fn point_field(&self) -> Option<&PointField> {
        self.field.as_ref()
    }

    pub fn engine(&self) -> &PhotometricEngine {
        &self.engine
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.spec.palette = palette;
    }

    pub fn set_hex(&mut self, index: usize, hex: HexColor) -> Result<(), ChipfieldError> {
        self.spec.palette.set_hex(index, hex)
    }

    pub fn set_density(&mut self, index: usize, density: f64) -> Result<(), ChipfieldError> {
        self.spec.palette.set_density(index, density)
    }

    /// Selects the light by registry id.
    pub fn set_light(&mut self, id: &str) -> Result<(), ChipfieldError> {
        light::resolve(id)?;
        self.spec.light = id.to_string();
        Ok(())
    }

    /// Changes the density scale. Geometry is rebuilt on the next render
    /// with the current seed.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), ChipfieldError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return Err(ChipfieldError::InvalidScale(scale));
        }
        self.spec.scale = scale;
        Ok(())
    }

    /// Changes the canvas size. Geometry is rebuilt on the next render with
    /// the current seed.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<(), ChipfieldError> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(ChipfieldError::InvalidDimensions);
        }
        self.spec.width = width;
        self.spec.height = height;
        Ok(())
    }

    /// Switches to a new seed and discards the cached geometry.
    pub fn regenerate(&mut self, seed: u64) {
        self.spec.seed = seed;
        self.field = None;
    }

    /// [`regenerate`](Self::regenerate) with a fresh random 32-bit seed.
    /// Returns the seed so the colorway can be reproduced.
    pub fn regenerate_random(&mut self) -> u64 {
        let seed = u64::from(rand::random::<u32>());
        self.regenerate(seed);
        seed
    }

    /// Draws the field onto `surface` and returns what was drawn.
    ///
    /// The cached field is kept even when the pass fails part way through.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Result<RenderPass, ChipfieldError> {
        let neutral = HexColor::parse(NEUTRAL_FILL)?;
        let (width, height, seed) = (self.spec.width, self.spec.height, self.spec.seed);

        if self.spec.palette.is_empty() {
            let light = light::resolve(&self.spec.light)?;
            surface.clear(&neutral);
            return Ok(RenderPass {
                cell_count: 0,
                seed,
                width,
                height,
                light: light.id.clone(),
                smoothing: true,
                cells: Vec::new(),
            });
        }

        let n = self.cell_count();
        let (w, h) = (width as f64, height as f64);
        let field = match self.field.take() {
            Some(field) if field.matches(n, w, h, seed) => field,
            _ => {
                log::debug!("generating {n} cell centers for {width}x{height}, seed {seed}");
                PointField::generate(n, w, h, seed)
            }
        };
        let field = &*self.field.insert(field);

        let polygons = self
            .tessellator
            .tessellate(field.points(), Bounds::from_size(w, h));
        let light = light::resolve(&self.spec.light)?;
        let recolored = self.engine.recolor_palette(&self.spec.palette, light);
        let colors = self.spec.palette.colors();

        let mut cells = Vec::with_capacity(polygons.len());
        for (i, (polygon, &center)) in polygons.into_iter().zip(field.points()).enumerate() {
            let Some(polygon) = polygon else {
                continue;
            };
            let palette_index = draw_seeded_index(colors, cell_seed(seed, i))?;
            cells.push(RenderedCell {
                index: i,
                center,
                polygon,
                palette_index,
                color: recolored[palette_index].clone(),
            });
        }

        let smoothing = smoothing_enabled(n);
        surface.set_smoothing(smoothing);
        surface.clear(&neutral);
        let mut coverage = CoverageMask::new(width, height);
        for cell in &cells {
            let path = pixel_path(&cell.polygon, n);
            surface.fill_polygon(&cell.color, &path);
            coverage.mark(&path);
        }
        fill_uncovered(surface, &coverage, &cells);

        Ok(RenderPass {
            cell_count: n,
            seed,
            width,
            height,
            light: light.id.clone(),
            smoothing,
            cells,
        })
    }
}

/// Paints each pixel no cell path reached with the color of the cell whose
/// center is nearest the pixel center. Ties go to the lowest cell index.
///
/// Rounded paths of thin cells can miss every pixel center they border.
fn fill_uncovered(surface: &mut dyn Surface, coverage: &CoverageMask, cells: &[RenderedCell]) {
    if cells.is_empty() {
        return;
    }
    let mut filled = 0usize;
    for (x, y) in coverage.uncovered() {
        let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
        let mut nearest = &cells[0];
        let mut best = p.distance_squared(nearest.center);
        for cell in &cells[1..] {
            let d = p.distance_squared(cell.center);
            if d < best {
                best = d;
                nearest = cell;
            }
        }
        let (x, y) = (x as i32, y as i32);
        surface.fill_polygon(
            &nearest.color,
            &[
                IVec2::new(x, y),
                IVec2::new(x + 1, y),
                IVec2::new(x + 1, y + 1),
                IVec2::new(x, y + 1),
            ],
        );
        filled += 1;
    }
    if filled > 0 {
        log::debug!("filled {filled} uncovered pixels from nearest centers");
    }
}
