//! # Sample Grid
//!
//! A square grid of `(resolution + 1)²` sample points centred on the origin,
//! with a displacement buffer and a color buffer that are allocated once per
//! resolution and overwritten in place every frame.
//!
//! ## Layout
//!
//! ```text
//! index = row * (resolution + 1) + col
//! x     = -extent/2 + col * extent / resolution
//! z     = -extent/2 + row * extent / resolution     (stored as Vec2::y)
//! ```
//!
//! Rows are independent, so large grids are filled in parallel with rayon.
//!
//! ## Color classification
//!
//! | Displacement | Shade | RGB |
//! |--------------|-------|-----|
//! | `|Y| < threshold` | Blank | `(0, 0, 0)` |
//! | otherwise | Gradient(c), `c = (Y + 2) / 4` clamped | `(c, 0.5, 1 - c)` |
//! | no wave defined | Undefined | `(0, 0, 0)` |

use rayon::prelude::*;
use serde::Serialize;

use super::FieldModel;
use crate::geometry::Vec2;
use crate::shader::{clamp01, inverse_lerp};

/// Side length of the square scene, in scene units.
pub const DEFAULT_EXTENT: f64 = 70.0;

/// Largest resolution the demonstrations offer.
pub const MAX_RESOLUTION: usize = 400;

/// Rows per side at which filling switches to rayon.
const PARALLEL_THRESHOLD: usize = 128;

/// Displacement range mapped onto the two-hue gradient.
const GRADIENT_LOW: f64 = -2.0;
const GRADIENT_HIGH: f64 = 2.0;

/// Render classification of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Shade {
    /// Below the black threshold.
    #[default]
    Blank,
    /// Position on the gradient, in [0, 1].
    Gradient(f32),
    /// No wave defined at this sample.
    Undefined,
}

impl Shade {
    /// Classify an already computed displacement. Never touches the physics.
    #[inline]
    pub fn classify(displacement: Option<f64>, black_threshold: f64) -> Self {
        match displacement {
            None => Shade::Undefined,
            Some(y) if y.abs() < black_threshold => Shade::Blank,
            Some(y) => Shade::Gradient(clamp01(inverse_lerp(GRADIENT_LOW, GRADIENT_HIGH, y)) as f32),
        }
    }

    #[inline]
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Shade::Blank | Shade::Undefined => [0.0, 0.0, 0.0],
            Shade::Gradient(c) => [c, 0.5, 1.0 - c],
        }
    }
}

/// Geometry of the grid, separate from its buffers so rows can borrow it
/// while the buffers are split across threads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayout {
    pub resolution: usize,
    pub extent: f64,
}

impl GridLayout {
    /// Points per side: `resolution + 1`.
    #[inline]
    pub fn side(&self) -> usize {
        self.resolution + 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.side() * self.side()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.extent / self.resolution as f64
    }

    #[inline]
    pub fn position(&self, row: usize, col: usize) -> Vec2 {
        let half = self.extent / 2.0;
        Vec2::new(
            -half + col as f64 * self.step(),
            -half + row as f64 * self.step(),
        )
    }

    #[inline]
    pub fn position_of(&self, index: usize) -> Vec2 {
        self.position(index / self.side(), index % self.side())
    }
}

/// Pre-allocated per-frame buffers for one field view.
///
/// Only [`FieldGrid::evaluate`] and [`FieldGrid::reclassify`] write the
/// buffers; everyone else reads them through slices until the next tick.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    layout: GridLayout,
    displacement: Vec<f32>,
    shades: Vec<Shade>,
    colors: Vec<[f32; 3]>,
}

impl FieldGrid {
    /// Allocate buffers for a grid. `resolution` is clamped to at least 1.
    pub fn new(resolution: usize, extent: f64) -> Self {
        let layout = GridLayout {
            resolution: resolution.max(1),
            extent,
        };
        let len = layout.len();
        Self {
            layout,
            displacement: vec![0.0; len],
            shades: vec![Shade::Blank; len],
            colors: vec![[0.0; 3]; len],
        }
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn resolution(&self) -> usize {
        self.layout.resolution
    }

    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    /// Reallocate for a new resolution. A no-op when it is unchanged.
    pub fn resize(&mut self, resolution: usize) {
        let resolution = resolution.max(1);
        if resolution != self.layout.resolution {
            *self = Self::new(resolution, self.layout.extent);
        }
    }

    pub fn displacement(&self) -> &[f32] {
        &self.displacement
    }

    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Recompute every sample of `model` at time `t`, overwriting all buffers.
    pub fn evaluate<M: FieldModel + ?Sized>(&mut self, model: &M, t: f64, black_threshold: f64) {
        let layout = self.layout;
        let side = layout.side();

        let fill = |row: usize, disp: &mut [f32], shades: &mut [Shade], colors: &mut [[f32; 3]]| {
            for col in 0..side {
                let value = model.sample(layout.position(row, col), t);
                let shade = Shade::classify(value, black_threshold);
                disp[col] = value.unwrap_or(0.0) as f32;
                shades[col] = shade;
                colors[col] = shade.rgb();
            }
        };

        if side >= PARALLEL_THRESHOLD {
            self.displacement
                .par_chunks_mut(side)
                .zip(self.shades.par_chunks_mut(side))
                .zip(self.colors.par_chunks_mut(side))
                .enumerate()
                .for_each(|(row, ((disp, shades), colors))| fill(row, disp, shades, colors));
        } else {
            self.displacement
                .chunks_mut(side)
                .zip(self.shades.chunks_mut(side))
                .zip(self.colors.chunks_mut(side))
                .enumerate()
                .for_each(|(row, ((disp, shades), colors))| fill(row, disp, shades, colors));
        }
    }

    /// Re-run color classification on the stored displacements without
    /// evaluating the model. Undefined samples stay undefined.
    pub fn reclassify(&mut self, black_threshold: f64) {
        for ((d, shade), color) in self
            .displacement
            .iter()
            .zip(self.shades.iter_mut())
            .zip(self.colors.iter_mut())
        {
            if *shade != Shade::Undefined {
                *shade = Shade::classify(Some(*d as f64), black_threshold);
                *color = shade.rgb();
            }
        }
    }

    /// Smallest and largest defined displacement in the current frame.
    pub fn range(&self) -> Option<(f32, f32)> {
        self.displacement
            .iter()
            .zip(&self.shades)
            .filter(|(_, s)| **s != Shade::Undefined)
            .map(|(d, _)| *d)
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }

    /// Number of samples with no wave defined.
    pub fn undefined_count(&self) -> usize {
        self.shades.iter().filter(|s| **s == Shade::Undefined).count()
    }
}
