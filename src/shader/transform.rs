//! Coordinate transformation functions.

use std::f64::consts::PI;

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert polar coordinates to Cartesian.
#[inline]
pub fn polar_to_cart(r: f64, theta: f64) -> (f64, f64) {
    (r * theta.cos(), r * theta.sin())
}

/// Project a point on a circle onto the ellipse seen when the circle's plane
/// is tilted about the vertical axis.
///
/// Only the x-component shrinks, by `cos(tilt)`. A tilt of 0° leaves the
/// circle intact; 90° collapses it onto the vertical line, which is exactly
/// one-dimensional simple-harmonic motion.
#[inline]
pub fn project_tilted(x: f64, y: f64, tilt_deg: f64) -> (f64, f64) {
    (x * deg_to_rad(tilt_deg).cos(), y)
}
