//! # Undulate - Wave-Field Simulation Core
//!
//! Undulate computes the physics behind a set of interactive wave
//! demonstrations. It provides:
//!
//! - **Point-source fields**: attenuated sources combined by linear superposition
//! - **Refraction**: a single source across a planar boundary, via Snell's law
//! - **Circular motion**: phase-to-vector projection and delayed oscillator rings
//! - **Interference probe**: path differences expressed in wavelengths
//! - **Demos**: frame-driven wrappers that own the per-frame buffers
//!
//! ## Quick Start
//!
//! ```no_run
//! use undulate::demo::{self, Demo};
//! use undulate::geometry::Point3;
//! use undulate::demo::interference::Interference;
//!
//! let mut demo = Interference::default();
//! demo.set_param("phase_shift", "3.14159")?;
//!
//! // One frame at 60 fps
//! demo.tick(1.0 / 60.0);
//! let colors = demo.grid().colors();
//! assert_eq!(colors.len(), 201 * 201);
//!
//! // Probe a point between frames
//! let result = demo.select_point(Point3::new(0.0, 0.0, 5.0));
//! println!("{:?}", result.units);
//!
//! // Or go through the registry
//! let mut any = demo::require("refraction")?;
//! any.tick(1.0 / 60.0);
//!
//! # Ok::<(), undulate::UndulateError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`clock`] | Simulation time: advance, wrap, pause |
//! | [`circular`] | Circular motion projector and oscillator rings |
//! | [`field`] | Point-source and refraction fields, sample grid |
//! | [`probe`] | Two-source path comparison in wavelengths |
//! | [`beats`] | Rotating phasors and traveling waveforms |
//! | [`demo`] | Demonstrations, parameters and the registry |
//! | [`export`] | PNG export of field grids |
//! | [`shader`] | Scalar primitives shared by the evaluators |
//! | [`geometry`] | Plane vectors |
//! | [`error`] | Error types |

pub mod beats;
pub mod circular;
pub mod clock;
pub mod demo;
pub mod error;
pub mod export;
pub mod field;
pub mod geometry;
pub mod probe;
pub mod shader;

// Re-exports for convenience
pub use clock::{ClockStep, SimulationClock};
pub use error::UndulateError;
pub use geometry::{Point3, Vec2};
