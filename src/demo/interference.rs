//! # Two-Source Interference
//!
//! Two point sources on the x axis, symmetric about the origin, evaluated
//! over the square sample grid every frame.
//!
//! ```text
//! source 1 = (+sourceDistance / 2, 0),  phase 0
//! source 2 = (-sourceDistance / 2, 0),  phase phaseShift
//! ω        = speed
//! λ        = speed * period               (probe convention)
//! ```
//!
//! Selecting a point runs the [`ProbeAnalyzer`] and, every following frame,
//! refreshes the composite height at that point and the two per-source
//! profiles along the straight paths from each source to it.

use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;
use std::fmt;
use std::time::Instant;

use super::{
    ConfigEpoch, Demo, ParamSpec, parse_f64, parse_usize, require_non_negative, require_positive,
    require_range, unknown_param,
};
use crate::clock::{ClockStep, SimulationClock};
use crate::error::UndulateError;
use crate::field::grid::{DEFAULT_EXTENT, MAX_RESOLUTION};
use crate::field::{FieldGrid, FieldSample, PointSourceField, WaveSource};
use crate::geometry::{Point3, Vec2};
use crate::probe::{ProbeAnalyzer, ProbeResult, ProbeState};

/// Segments per extracted path profile (101 samples).
pub const PROFILE_SEGMENTS: usize = 100;

/// Upper bound for `wrap_cycles`.
pub const MAX_WRAP_CYCLES: usize = 10;

/// Parameters for the interference demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    /// Separation of the two sources. Default: 20.0
    pub source_distance: f64,
    /// Oscillation period. Default: 1.0
    pub period: f64,
    /// Angular rate, also the wavelength factor. Default: 2.0
    pub speed: f64,
    /// Grid cells per side. Default: 200
    pub resolution: usize,
    /// Exponential decay with distance. Default: 20.0
    pub attenuation: f64,
    /// Displacements below this magnitude render black. Default: 0.0
    pub black_threshold: f64,
    /// Phase of source 2 relative to source 1, radians. Default: 0.0
    pub phase_shift: f64,
    /// Wrap time after this many periods; 0 runs unbounded. Default: 0
    pub wrap_cycles: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            source_distance: 20.0,
            period: 1.0,
            speed: 2.0,
            resolution: 200,
            attenuation: 20.0,
            black_threshold: 0.0,
            phase_shift: 0.0,
            wrap_cycles: 0,
        }
    }
}

impl Params {
    /// Generate a randomized but valid configuration.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            source_distance: rng.random_range(5.0..40.0),
            period: rng.random_range(0.5..3.0),
            speed: rng.random_range(0.5..5.0),
            resolution: 200,
            attenuation: rng.random_range(0.0..40.0),
            black_threshold: rng.random_range(0.0..0.3),
            phase_shift: rng.random_range(0.0..TAU),
            wrap_cycles: 0,
        }
    }

    pub fn validate(&self) -> Result<(), UndulateError> {
        require_range("source_distance", self.source_distance, 0.0, DEFAULT_EXTENT)?;
        require_positive("period", self.period)?;
        require_positive("speed", self.speed)?;
        require_range("resolution", self.resolution as f64, 1.0, MAX_RESOLUTION as f64)?;
        require_non_negative("attenuation", self.attenuation)?;
        require_non_negative("black_threshold", self.black_threshold)?;
        require_range("wrap_cycles", self.wrap_cycles as f64, 0.0, MAX_WRAP_CYCLES as f64)?;
        if !self.phase_shift.is_finite() {
            return Err(UndulateError::invalid("phase_shift", self.phase_shift, "a finite angle"));
        }
        Ok(())
    }

    pub fn wavelength(&self) -> f64 {
        self.speed * self.period
    }

    pub fn sources(&self) -> [WaveSource; 2] {
        let half = self.source_distance / 2.0;
        [
            WaveSource::new(Vec2::new(half, 0.0), self.period),
            WaveSource::new(Vec2::new(-half, 0.0), self.period).with_phase(self.phase_shift),
        ]
    }

    fn wrap_period(&self) -> Option<f64> {
        (self.wrap_cycles > 0).then(|| self.wrap_cycles as f64 * self.period)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance={:.1} period={:.2} speed={:.2} res={} atten={:.1} black={:.2} shift={:.2}",
            self.source_distance,
            self.period,
            self.speed,
            self.resolution,
            self.attenuation,
            self.black_threshold,
            self.phase_shift
        )
    }
}

/// Interference demo state and per-frame buffers.
#[derive(Debug, Clone)]
pub struct Interference {
    params: Params,
    config: ConfigEpoch,
    clock: SimulationClock,
    field: PointSourceField,
    grid: FieldGrid,
    probe: ProbeState,
    probe_height: Option<f64>,
    profiles: [Vec<FieldSample>; 2],
    source_heights: [f64; 2],
}

impl Default for Interference {
    fn default() -> Self {
        Self::build(Params::default())
    }
}

impl Interference {
    /// Create with validated params.
    pub fn new(params: Params) -> Result<Self, UndulateError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    /// Create with randomized params.
    pub fn random() -> Self {
        Self::build(Params::random())
    }

    fn build(params: Params) -> Self {
        Self {
            grid: FieldGrid::new(params.resolution, DEFAULT_EXTENT),
            params,
            config: ConfigEpoch::default(),
            clock: SimulationClock::new(),
            field: PointSourceField::default(),
            probe: ProbeState::default(),
            probe_height: None,
            profiles: [Vec::new(), Vec::new()],
            source_heights: [0.0; 2],
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replace all parameters at once.
    pub fn set_params(&mut self, params: Params) -> Result<(), UndulateError> {
        params.validate()?;
        let threshold_only = !self.config.is_dirty()
            && Params {
                black_threshold: self.params.black_threshold,
                ..params.clone()
            } == self.params;
        self.params = params;
        if threshold_only {
            // Displacements are current; only the colors depend on the threshold
            self.grid.reclassify(self.params.black_threshold);
            self.config.bump();
            tracing::debug!(black_threshold = self.params.black_threshold, "interference reclassified");
        } else {
            self.config.mark();
        }
        Ok(())
    }

    /// Analyzer for the current source layout.
    pub fn analyzer(&self) -> ProbeAnalyzer {
        let [a, b] = self.params.sources();
        ProbeAnalyzer::new([a.position, b.position], self.params.speed, self.params.period)
    }

    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    pub fn point_sources(&self) -> &PointSourceField {
        &self.field
    }

    /// Select a point, replacing any previous selection.
    pub fn select_point(&mut self, point: Point3) -> ProbeResult {
        let analyzer = self.analyzer();
        let result = self.probe.select(&analyzer, point);
        if !self.config.is_dirty() {
            self.refresh_probe_outputs(self.clock.time());
        }
        result
    }

    pub fn clear_probe(&mut self) {
        self.probe.clear();
        self.probe_height = None;
        self.profiles.iter_mut().for_each(Vec::clear);
    }

    pub fn probe(&self) -> Option<&ProbeResult> {
        self.probe.current()
    }

    /// Superposed displacement at the selected point.
    pub fn probe_height(&self) -> Option<f64> {
        self.probe_height
    }

    /// Per-source displacement along the path from each source to the
    /// selected point. Empty without a selection.
    pub fn profiles(&self) -> &[Vec<FieldSample>; 2] {
        &self.profiles
    }

    /// Oscillator height of each source marker.
    pub fn source_heights(&self) -> [f64; 2] {
        self.source_heights
    }

    fn rebuild(&mut self) {
        let mut field = PointSourceField::new(self.params.attenuation, self.params.speed);
        field.set_sources(self.params.sources().to_vec());
        self.field = field;
        self.grid.resize(self.params.resolution);
        self.clock.set_wrap_period(self.params.wrap_period());
        let analyzer = self.analyzer();
        self.probe.refresh(&analyzer);
        tracing::info!(epoch = self.config.epoch(), params = %self.params, "interference configured");
    }

    fn recompute(&mut self) {
        let started = Instant::now();
        let t = self.clock.time();
        self.grid.evaluate(&self.field, t, self.params.black_threshold);
        for (i, height) in self.source_heights.iter_mut().enumerate() {
            *height = self.field.source_height(i, t).unwrap_or(0.0);
        }
        self.refresh_probe_outputs(t);
        tracing::debug!(
            t,
            samples = self.grid.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "interference frame"
        );
    }

    fn refresh_probe_outputs(&mut self, t: f64) {
        let Some(target) = self.probe.current().map(|p| p.point.planar()) else {
            return;
        };
        self.probe_height = Some(self.field.displacement(target, t));
        for (i, profile) in self.profiles.iter_mut().enumerate() {
            self.field.profile_into(i, target, t, PROFILE_SEGMENTS, profile);
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    demo: &'static str,
    time: f64,
    running: bool,
    epoch: u64,
    params: &'a Params,
    wavelength: f64,
    sources: [WaveSource; 2],
    source_heights: [f64; 2],
    samples: usize,
    displacement_range: Option<(f32, f32)>,
    probe: Option<&'a ProbeResult>,
    probe_height: Option<f64>,
}

impl Demo for Interference {
    fn name(&self) -> &'static str {
        "interference"
    }

    fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    fn tick(&mut self, dt: f64) -> ClockStep {
        let rebuilt = self.config.take();
        if rebuilt {
            self.rebuild();
        }
        let step = self.clock.advance(dt);
        if step.is_live() || rebuilt {
            self.recompute();
        }
        step
    }

    fn reset(&mut self) {
        self.clock.reset();
        self.clear_probe();
        if !self.config.is_dirty() {
            self.recompute();
        }
    }

    fn epoch(&self) -> u64 {
        self.config.epoch()
    }

    fn params_description(&self) -> String {
        self.params.to_string()
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), UndulateError> {
        let mut next = self.params.clone();
        match name {
            "source_distance" => next.source_distance = parse_f64(name, value)?,
            "period" => next.period = parse_f64(name, value)?,
            "speed" => next.speed = parse_f64(name, value)?,
            "resolution" => next.resolution = parse_usize(name, value)?,
            "attenuation" => next.attenuation = parse_f64(name, value)?,
            "black_threshold" => next.black_threshold = parse_f64(name, value)?,
            "phase_shift" => next.phase_shift = parse_f64(name, value)?,
            "wrap_cycles" => next.wrap_cycles = parse_usize(name, value)?,
            _ => return Err(unknown_param("interference", name, &self.list_params())),
        }
        self.set_params(next)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source_distance", format!("{:.1}", self.params.source_distance)),
            ("period", format!("{:.2}", self.params.period)),
            ("speed", format!("{:.2}", self.params.speed)),
            ("resolution", self.params.resolution.to_string()),
            ("attenuation", format!("{:.1}", self.params.attenuation)),
            ("black_threshold", format!("{:.2}", self.params.black_threshold)),
            ("phase_shift", format!("{:.2}", self.params.phase_shift)),
            ("wrap_cycles", self.params.wrap_cycles.to_string()),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("source_distance", "Source Distance", 0.0, 70.0, 1.0)
                .with_description("Separation of the two sources"),
            ParamSpec::slider("period", "Period", 0.1, 5.0, 0.1)
                .with_description("Oscillation period"),
            ParamSpec::slider("speed", "Speed", 0.1, 10.0, 0.1)
                .with_description("Animation speed; wavelength is speed x period"),
            ParamSpec::int("resolution", "Resolution", Some(1), Some(MAX_RESOLUTION as i64))
                .with_description("Grid cells per side"),
            ParamSpec::slider("attenuation", "Attenuation", 0.0, 100.0, 1.0)
                .with_description("Amplitude decay with distance"),
            ParamSpec::slider("black_threshold", "Black Threshold", 0.0, 2.0, 0.01)
                .with_description("Paint small displacements black"),
            ParamSpec::slider("phase_shift", "Phase Shift", 0.0, TAU, 0.01)
                .with_description("Phase of source 2, radians"),
            ParamSpec::int("wrap_cycles", "Wrap Cycles", Some(0), Some(MAX_WRAP_CYCLES as i64))
                .with_description("Restart after this many periods (0 = never)"),
        ]
    }

    fn randomize(&mut self) {
        self.params = Params::random();
        self.config.mark();
    }

    fn summary(&self) -> Result<serde_json::Value, UndulateError> {
        let summary = Summary {
            demo: self.name(),
            time: self.clock.time(),
            running: self.clock.is_running(),
            epoch: self.config.epoch(),
            params: &self.params,
            wavelength: self.params.wavelength(),
            sources: self.params.sources(),
            source_heights: self.source_heights,
            samples: self.grid.len(),
            displacement_range: self.grid.range(),
            probe: self.probe.current(),
            probe_height: self.probe_height,
        };
        Ok(serde_json::to_value(summary)?)
    }

    fn field(&self) -> Option<&FieldGrid> {
        Some(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Shade;
    use crate::probe::WavelengthUnits;
    use pretty_assertions::assert_eq;

    fn small() -> Interference {
        Interference::new(Params {
            resolution: 20,
            ..Params::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_layout() {
        let [a, b] = Params::default().sources();
        assert_eq!(a.position, Vec2::new(10.0, 0.0));
        assert_eq!(b.position, Vec2::new(-10.0, 0.0));
        assert_eq!(Params::default().wavelength(), 2.0);
    }

    #[test]
    fn test_first_tick_fills_grid() {
        let mut demo = small();
        demo.tick(0.1);
        let grid = demo.grid();
        assert_eq!(grid.len(), 21 * 21);
        let p = grid.layout().position_of(17);
        let expected = demo.point_sources().displacement(p, demo.time()) as f32;
        assert!((grid.displacement()[17] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_param_rejected() {
        let mut demo = small();
        assert!(demo.set_param("period", "0").is_err());
        assert!(demo.set_param("speed", "-1").is_err());
        assert!(demo.set_param("resolution", "0").is_err());
        assert!(demo.set_param("attenuation", "-0.5").is_err());
        assert!(demo.set_param("black_threshold", "-0.1").is_err());
        assert!(matches!(
            demo.set_param("bogus", "1"),
            Err(UndulateError::UnknownParam(_))
        ));
        assert_eq!(demo.params(), &Params { resolution: 20, ..Params::default() });
        assert_eq!(demo.epoch(), 0);
    }

    #[test]
    fn test_config_change_rebuilds_on_next_tick() {
        let mut demo = small();
        demo.tick(0.0);
        demo.set_param("resolution", "10").unwrap();
        demo.set_param("source_distance", "30").unwrap();
        assert_eq!(demo.epoch(), 2);
        // Buffers keep the old shape until the next tick
        assert_eq!(demo.grid().len(), 21 * 21);
        demo.tick(0.0);
        assert_eq!(demo.grid().len(), 11 * 11);
        assert_eq!(demo.point_sources().sources()[0].position, Vec2::new(15.0, 0.0));
    }

    #[test]
    fn test_paused_keeps_last_frame() {
        let mut demo = small();
        demo.tick(0.2);
        let frame = demo.grid().displacement().to_vec();
        demo.set_running(false);
        assert_eq!(demo.tick(0.5), ClockStep::Paused);
        assert_eq!(demo.grid().displacement(), frame.as_slice());
        assert!((demo.time() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_change_reclassifies_in_place() {
        let mut demo = small();
        demo.tick(0.2);
        demo.set_running(false);
        let frame = demo.grid().displacement().to_vec();

        demo.set_param("black_threshold", "0.5").unwrap();
        assert_eq!(demo.epoch(), 1);
        // Applied immediately, with no physics re-run
        assert_eq!(demo.grid().displacement(), frame.as_slice());
        for (d, shade) in frame.iter().zip(demo.grid().shades()) {
            assert_eq!(*shade, Shade::classify(Some(*d as f64), 0.5));
        }
        assert!(demo.grid().shades().contains(&Shade::Blank));

        demo.set_param("black_threshold", "0").unwrap();
        assert!(!demo.grid().shades().contains(&Shade::Blank));
    }

    #[test]
    fn test_wrap_cycles_range() {
        let mut demo = small();
        assert!(demo.set_param("wrap_cycles", "100000").is_err());
        assert!(demo.set_param("wrap_cycles", "11").is_err());
        assert!(demo.set_param("wrap_cycles", "10").is_ok());
        assert_eq!(demo.params().wrap_cycles, MAX_WRAP_CYCLES);
    }

    #[test]
    fn test_profile_buffers_reused_across_ticks() {
        let mut demo = small();
        demo.tick(0.0);
        demo.select_point(Point3::new(3.0, 0.0, 12.0));
        let ptrs = demo.profiles().each_ref().map(|p| p.as_ptr());
        for _ in 0..5 {
            demo.tick(1.0 / 60.0);
        }
        assert_eq!(demo.profiles().each_ref().map(|p| p.as_ptr()), ptrs);
        assert!(demo.profiles().iter().all(|p| p.len() == PROFILE_SEGMENTS + 1));
    }

    #[test]
    fn test_midpoint_probe() {
        let mut demo = small();
        demo.tick(0.0);
        let result = demo.select_point(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(result.distances.d1, result.distances.d2);
        assert!(matches!(
            result.units,
            WavelengthUnits::Defined {
                integer_part: 0,
                ..
            }
        ));
        assert!(demo.probe_height().is_some());
    }

    #[test]
    fn test_profiles_follow_selection() {
        let mut demo = small();
        demo.tick(0.0);
        let target = Point3::new(3.0, 0.0, 12.0);
        demo.select_point(target);
        demo.tick(0.05);

        let t = demo.time();
        for (i, profile) in demo.profiles().iter().enumerate() {
            assert_eq!(profile.len(), PROFILE_SEGMENTS + 1);
            let source = demo.point_sources().sources()[i];
            assert_eq!(profile[0].position, source.position);
            let last = profile[PROFILE_SEGMENTS];
            assert!((last.position - target.planar()).length() < 1e-9);
            let own = source.displacement(target.planar(), t, 20.0, 2.0);
            assert!((last.displacement - own).abs() < 1e-12);
        }
        let sum = demo.profiles()[0][PROFILE_SEGMENTS].displacement
            + demo.profiles()[1][PROFILE_SEGMENTS].displacement;
        assert!((demo.probe_height().unwrap() - sum).abs() < 1e-12);

        demo.clear_probe();
        assert!(demo.probe().is_none());
        assert!(demo.profiles().iter().all(Vec::is_empty));
    }

    #[test]
    fn test_probe_refreshed_on_reconfigure() {
        let mut demo = small();
        demo.tick(0.0);
        demo.select_point(Point3::new(10.0, 0.0, 0.0));
        demo.set_param("speed", "4").unwrap();
        demo.tick(0.0);
        match demo.probe().unwrap().units {
            WavelengthUnits::Defined {
                wavelength,
                integer_part,
                ..
            } => {
                assert_eq!(wavelength, 4.0);
                assert_eq!(integer_part, 5);
            }
            WavelengthUnits::Undefined => panic!("wavelength is positive"),
        }
    }

    #[test]
    fn test_wrap_cycles_bound_time() {
        let mut demo = small();
        demo.set_param("wrap_cycles", "3").unwrap();
        for _ in 0..400 {
            demo.tick(1.0 / 60.0);
            assert!(demo.time() < 3.0);
        }
    }

    #[test]
    fn test_reset_clears_probe() {
        let mut demo = small();
        demo.tick(0.5);
        demo.select_point(Point3::new(1.0, 0.0, 1.0));
        demo.reset();
        assert_eq!(demo.time(), 0.0);
        assert!(demo.probe().is_none());
    }

    #[test]
    fn test_source_heights_bob() {
        let mut demo = small();
        demo.tick(0.125);
        let t = demo.time();
        let expected = 2.0 * (-2.0 * t).sin();
        assert!((demo.source_heights()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_random_params_are_valid() {
        for _ in 0..20 {
            Params::random().validate().unwrap();
        }
    }

    #[test]
    fn test_summary_json() {
        let mut demo = small();
        demo.tick(0.1);
        let json = demo.summary().unwrap();
        assert_eq!(json["demo"], "interference");
        assert_eq!(json["samples"], 441);
        assert_eq!(json["wavelength"], 2.0);
        assert!(json["probe"].is_null());
    }
}
