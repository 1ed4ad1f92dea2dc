//! # Shader Primitives
//!
//! Scalar building blocks shared by every field evaluator. These mirror the
//! per-vertex arithmetic a vertex shader would run and are composed by
//! [`crate::field`] and [`crate::circular`] into the full models.
//!
//! ## Categories
//!
//! - [`distance`]: Planar Euclidean distance
//! - [`wave`]: Exponential attenuation, traveling sine
//! - [`transform`]: Degree/radian conversion, polar conversion, ellipse projection
//! - [`blend`]: Linear interpolation, clamping
//!
//! ## Example
//!
//! ```rust
//! use undulate::shader::*;
//!
//! // Displacement 5 units away from a source of amplitude 2
//! let d = dist(5.0, 0.0, 0.0, 0.0);
//! let y = attenuate(2.0, d, 20.0) * traveling_sin(d, 1.0, 2.0, 0.3, 0.0);
//! assert!(y.abs() <= 2.0);
//! ```

pub mod blend;
pub mod distance;
pub mod transform;
pub mod wave;

// Re-export all primitives at the top level for convenience
pub use blend::*;
pub use distance::*;
pub use transform::*;
pub use wave::*;
