//! Distance functions for spatial calculations.

/// Euclidean distance between two points.
#[inline]
pub fn dist(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

/// Absolute path-length difference between a point and two origins.
///
/// This is the quantity interference classification is built on: whole
/// multiples of a wavelength reinforce, half multiples cancel.
#[inline]
pub fn path_difference(x: f64, y: f64, a: (f64, f64), b: (f64, f64)) -> f64 {
    (dist(x, y, a.0, a.1) - dist(x, y, b.0, b.1)).abs()
}
