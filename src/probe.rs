//! # Interference Probe
//!
//! Compares the path lengths from a selected point to two sources and
//! expresses them in wavelengths.
//!
//! ```text
//! d1, d2      = planar distances to source 1 and 2     (height ignored)
//! difference  = |d1 - d2|
//! λ           = speed * period
//! n           = difference / λ  = integer_part + fractional_part
//! ```
//!
//! A whole number of wavelengths marks constructive interference for
//! in-phase sources; a fractional part near 0.5 marks cancellation.

use serde::Serialize;

use crate::geometry::{Point3, Vec2};
use crate::shader::path_difference;

/// Distances from the probe point to each source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distances {
    pub d1: f64,
    pub d2: f64,
}

/// Path lengths in units of the wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WavelengthUnits {
    Defined {
        wavelength: f64,
        d1: f64,
        d2: f64,
        difference: f64,
        integer_part: i64,
        fractional_part: f64,
    },
    /// Period or speed non-positive: the ratios have no meaning.
    Undefined,
}

impl WavelengthUnits {
    /// Express `distances` in units of `wavelength`.
    pub fn new(distances: Distances, wavelength: f64) -> Self {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return WavelengthUnits::Undefined;
        }
        let difference = (distances.d1 - distances.d2).abs() / wavelength;
        let integer = difference.floor();
        WavelengthUnits::Defined {
            wavelength,
            d1: distances.d1 / wavelength,
            d2: distances.d2 / wavelength,
            difference,
            integer_part: integer as i64,
            fractional_part: difference - integer,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, WavelengthUnits::Defined { .. })
    }
}

/// Everything the probe reports for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeResult {
    pub point: Point3,
    pub distances: Distances,
    pub difference: f64,
    pub units: WavelengthUnits,
}

impl ProbeResult {
    /// True when the path difference is within `tolerance` wavelengths of
    /// a whole number.
    pub fn is_whole_wavelengths(&self, tolerance: f64) -> Option<bool> {
        match self.units {
            WavelengthUnits::Defined {
                fractional_part, ..
            } => Some(fractional_part < tolerance || 1.0 - fractional_part < tolerance),
            WavelengthUnits::Undefined => None,
        }
    }
}

/// Two-source path comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeAnalyzer {
    pub sources: [Vec2; 2],
    pub wavelength: f64,
}

impl ProbeAnalyzer {
    /// `wavelength = speed * period`, the demonstrations' convention.
    pub fn new(sources: [Vec2; 2], speed: f64, period: f64) -> Self {
        Self {
            sources,
            wavelength: speed * period,
        }
    }

    pub fn analyze(&self, point: Point3) -> ProbeResult {
        let p = point.planar();
        let [a, b] = self.sources;
        let distances = Distances {
            d1: p.distance(self.sources[0]),
            d2: p.distance(self.sources[1]),
        };
        ProbeResult {
            point,
            distances,
            difference: path_difference(p.x, p.y, (a.x, a.y), (b.x, b.y)),
            units: WavelengthUnits::new(distances, self.wavelength),
        }
    }
}

/// The currently selected probe, if any.
///
/// Selecting replaces the previous result; clearing drops it.
#[derive(Debug, Clone, Default)]
pub struct ProbeState {
    current: Option<ProbeResult>,
}

impl ProbeState {
    pub fn select(&mut self, analyzer: &ProbeAnalyzer, point: Point3) -> ProbeResult {
        let result = analyzer.analyze(point);
        self.current = Some(result);
        result
    }

    /// Re-run the analysis for the selected point (after a configuration
    /// change moved the sources or changed the wavelength).
    pub fn refresh(&mut self, analyzer: &ProbeAnalyzer) -> Option<ProbeResult> {
        let point = self.current?.point;
        Some(self.select(analyzer, point))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ProbeResult> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(speed: f64, period: f64) -> ProbeAnalyzer {
        ProbeAnalyzer::new([Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0)], speed, period)
    }

    #[test]
    fn test_midpoint_is_constructive() {
        let a = analyzer(2.0, 1.0);
        assert_eq!(a.wavelength, 2.0);
        let r = a.analyze(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(r.distances.d1, r.distances.d2);
        assert_eq!(r.difference, 0.0);
        match r.units {
            WavelengthUnits::Defined {
                integer_part,
                fractional_part,
                ..
            } => {
                assert_eq!(integer_part, 0);
                assert_eq!(fractional_part, 0.0);
            }
            WavelengthUnits::Undefined => panic!("wavelength is positive"),
        }
        assert_eq!(r.is_whole_wavelengths(1e-9), Some(true));
    }

    #[test]
    fn test_probe_on_source() {
        let r = analyzer(2.0, 1.0).analyze(Point3::new(10.0, 0.0, 0.0));
        assert_eq!(r.distances.d1, 0.0);
        assert_eq!(r.distances.d2, 20.0);
        assert_eq!(r.difference, 20.0);
        assert_eq!(
            r.units,
            WavelengthUnits::Defined {
                wavelength: 2.0,
                d1: 0.0,
                d2: 10.0,
                difference: 10.0,
                integer_part: 10,
                fractional_part: 0.0,
            }
        );
    }

    #[test]
    fn test_height_ignored() {
        let a = analyzer(2.0, 1.0);
        let low = a.analyze(Point3::new(3.0, 0.0, 4.0));
        let high = a.analyze(Point3::new(3.0, 17.0, 4.0));
        assert_eq!(low.distances, high.distances);
    }

    #[test]
    fn test_decomposition_law() {
        let a = analyzer(1.7, 0.9);
        for i in 0..200 {
            let p = Point3::new(-35.0 + i as f64 * 0.35, 0.0, 20.0 - i as f64 * 0.2);
            match a.analyze(p).units {
                WavelengthUnits::Defined {
                    difference,
                    integer_part,
                    fractional_part,
                    ..
                } => {
                    assert!((integer_part as f64 + fractional_part - difference).abs() < 1e-9);
                    assert!((0.0..1.0).contains(&fractional_part));
                }
                WavelengthUnits::Undefined => panic!("wavelength is positive"),
            }
        }
    }

    #[test]
    fn test_nonpositive_wavelength_is_undefined() {
        let r = analyzer(0.0, 1.0).analyze(Point3::new(1.0, 0.0, 1.0));
        assert_eq!(r.units, WavelengthUnits::Undefined);
        assert!(r.difference.is_finite());
        assert_eq!(r.is_whole_wavelengths(0.1), None);

        let r = analyzer(2.0, -1.0).analyze(Point3::new(1.0, 0.0, 1.0));
        assert!(!r.units.is_defined());
    }

    #[test]
    fn test_state_select_refresh_clear() {
        let mut state = ProbeState::default();
        assert!(state.refresh(&analyzer(2.0, 1.0)).is_none());

        state.select(&analyzer(2.0, 1.0), Point3::new(10.0, 0.0, 0.0));
        let refreshed = state.refresh(&analyzer(4.0, 1.0)).unwrap();
        assert_eq!(refreshed.point, Point3::new(10.0, 0.0, 0.0));
        assert!(matches!(
            refreshed.units,
            WavelengthUnits::Defined { integer_part: 5, .. }
        ));

        state.select(&analyzer(4.0, 1.0), Point3::new(0.0, 0.0, 3.0));
        assert_eq!(state.current().unwrap().point, Point3::new(0.0, 0.0, 3.0));

        state.clear();
        assert!(state.current().is_none());
    }
}
