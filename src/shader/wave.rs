//! Wave functions for traveling disturbances.

/// Divisor applied to `distance * attenuation` in the exponential falloff.
///
/// Keeps the attenuation slider in a comfortable 0-100 range for a 70-unit
/// scene.
pub const ATTENUATION_SCALE: f64 = 300.0;

/// Exponentially attenuated amplitude at a distance from its origin.
///
/// ```text
/// A(d) = base * exp(-d * attenuation / 300)
/// ```
///
/// Continuous at `d = 0` (returns `base`) and constant in `d` when
/// `attenuation = 0`. Non-increasing in `d` for `attenuation >= 0`.
#[inline]
pub fn attenuate(base: f64, distance: f64, attenuation: f64) -> f64 {
    base * (-distance * attenuation / ATTENUATION_SCALE).exp()
}

/// Traveling sine in [-1, 1].
///
/// ```text
/// sin(d * k - omega * t + phase)
/// ```
///
/// # Parameters
/// - `distance`: Path length from the origin
/// - `k`: Wavenumber (phase advance per unit of path)
/// - `omega`: Angular rate (phase advance per unit of time)
/// - `t`: Time
/// - `phase`: Constant phase offset in radians
#[inline]
pub fn traveling_sin(distance: f64, k: f64, omega: f64, t: f64, phase: f64) -> f64 {
    (distance * k - omega * t + phase).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_attenuate_at_origin() {
        assert_eq!(attenuate(2.0, 0.0, 50.0), 2.0);
    }

    #[test]
    fn test_attenuate_zero_is_constant() {
        for d in [0.0, 1.0, 35.0, 1e6] {
            assert_eq!(attenuate(2.0, d, 0.0), 2.0);
        }
    }

    #[test]
    fn test_attenuate_monotone() {
        let mut prev = attenuate(2.0, 0.0, 20.0);
        for i in 1..200 {
            let next = attenuate(2.0, i as f64 * 0.5, 20.0);
            assert!(next <= prev, "amplitude grew at d={}", i as f64 * 0.5);
            prev = next;
        }
    }

    #[test]
    fn test_traveling_sin_period_in_time() {
        let omega = 2.0;
        let a = traveling_sin(3.0, 1.0, omega, 0.4, 0.0);
        let b = traveling_sin(3.0, 1.0, omega, 0.4 + TAU / omega, 0.0);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_traveling_sin_phase() {
        let v = traveling_sin(0.0, 1.0, 1.0, 0.0, PI / 2.0);
        assert!((v - 1.0).abs() < 1e-12);
    }
}
