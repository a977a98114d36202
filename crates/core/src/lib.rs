#![deny(unsafe_code)]
//! Core types for chipfield, a seed-driven generator of mixed-chip color
//! fields.
//!
//! Provides the `Lcg` PRNG, deterministic `PointField`s, the
//! density-weighted sampler, color types (`HexColor`, `Srgb`, `LinearRgb`,
//! `Xyz`), the light-source registry, the photometric transform with its
//! bounded cache, contrast helpers, the `Tessellator` seam, and the
//! reproducible `FieldSpec`.

pub mod cache;
pub mod color;
pub mod contrast;
pub mod error;
pub mod light;
pub mod matrix;
pub mod palette;
pub mod photometric;
pub mod points;
pub mod prng;
pub mod sampler;
pub mod seed;
pub mod tessellate;

pub use cache::{EvictionPolicy, TransformCache};
pub use color::{HexColor, LinearRgb, Srgb, Xyz};
pub use error::ChipfieldError;
pub use light::LightSource;
pub use palette::{ChipColor, Palette};
pub use photometric::PhotometricEngine;
pub use points::PointField;
pub use prng::Lcg;
pub use seed::FieldSpec;
pub use tessellate::{Bounds, Polygon, Tessellator};
