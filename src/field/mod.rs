//! # Wave Fields
//!
//! Deterministic, time-parameterized displacement fields.
//!
//! Every evaluator here is a pure function of `(position, time, sources,
//! medium)`: nothing is carried from one sample to the next and nothing from
//! one frame to the next, so a sample can be recomputed anywhere (grid,
//! probe, path profile) and come out the same.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`source`] | Point sources, attenuation, linear superposition |
//! | [`refraction`] | Single source across a planar boundary (Snell's law) |
//! | [`grid`] | Pre-allocated sample grid, displacement and color buffers |

pub mod grid;
pub mod refraction;
pub mod source;

pub use grid::{FieldGrid, GridLayout, Shade};
pub use refraction::{Medium, RayPath, RefractionField, RefractionMedium};
pub use source::{FieldSample, PointSourceField, WaveSource};

use crate::geometry::Vec2;

/// A scalar displacement field over the simulation plane.
///
/// `None` means no wave is defined at that point (for instance the shadow
/// beyond the critical angle); renderers draw such samples blank.
pub trait FieldModel: Sync {
    fn sample(&self, p: Vec2, t: f64) -> Option<f64>;
}
