//! # Circular Motion and Simple-Harmonic Motion
//!
//! A point on a circle, its tilted projection, and two rings of phase-delayed
//! oscillators: the base ring and a copy delayed by one full period. Time
//! wraps every three periods.
//!
//! Selecting ring point `i` (never point 0, the reference) reports its phase
//! lag behind point 0.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use super::{
    ConfigEpoch, Demo, ParamSpec, parse_f64, parse_usize, require_positive, require_range,
    unknown_param,
};
use crate::circular::{
    CircularMotion, CycleCount, MotionState, PlotRecorder, PlotSample, Quantity, RingPoint,
    angle_readout_deg, phase_difference,
};
use crate::clock::{ClockStep, SimulationClock};
use crate::error::UndulateError;
use crate::shader::rad_to_deg;

/// Timeline length in periods.
pub const WRAP_CYCLES: f64 = 3.0;

/// Largest ring the demo offers.
pub const MAX_POINTS: usize = 120;

/// Parameters for the circular-motion demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    /// Time for one revolution. Default: 4.0
    pub period: f64,
    /// Circle radius. Default: 60.0
    pub radius: f64,
    /// Oscillators per ring. Default: 24
    pub num_points: usize,
    /// Tilt of the circle's plane in degrees; 90 leaves only the vertical
    /// oscillation. Default: 90.0
    pub rotation: f64,
    /// Quantity traced by the plot. Default: position
    pub quantity: Quantity,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            period: 4.0,
            radius: 60.0,
            num_points: 24,
            rotation: 90.0,
            quantity: Quantity::Position,
        }
    }
}

impl Params {
    /// Generate a randomized but valid configuration.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let quantity = match rng.random_range(0..3) {
            0 => Quantity::Position,
            1 => Quantity::Velocity,
            _ => Quantity::Acceleration,
        };
        Self {
            period: rng.random_range(1.0..8.0),
            radius: rng.random_range(20.0..100.0),
            num_points: rng.random_range(8..48),
            rotation: rng.random_range(0.0..=90.0),
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), UndulateError> {
        require_positive("period", self.period)?;
        require_positive("radius", self.radius)?;
        require_range("num_points", self.num_points as f64, 1.0, MAX_POINTS as f64)?;
        require_range("rotation", self.rotation, 0.0, 90.0)?;
        Ok(())
    }

    pub fn motion(&self) -> CircularMotion {
        CircularMotion::new(self.period, self.radius).with_tilt(self.rotation)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period={:.2} radius={:.0} points={} rotation={:.0} plot={}",
            self.period,
            self.radius,
            self.num_points,
            self.rotation,
            self.quantity.name()
        )
    }
}

/// Phase lag of a selected ring point behind point 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseComparison {
    pub index: usize,
    pub radians: f64,
    pub degrees: f64,
}

/// Circular-motion demo state and per-frame outputs.
#[derive(Debug, Clone)]
pub struct Circular {
    params: Params,
    config: ConfigEpoch,
    clock: SimulationClock,
    motion: CircularMotion,
    state: MotionState,
    base_ring: Vec<RingPoint>,
    delayed_ring: Vec<RingPoint>,
    plot: PlotRecorder,
    selected: Option<PhaseComparison>,
}

impl Default for Circular {
    fn default() -> Self {
        Self::build(Params::default())
    }
}

impl Circular {
    pub fn new(params: Params) -> Result<Self, UndulateError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    pub fn random() -> Self {
        Self::build(Params::random())
    }

    fn build(params: Params) -> Self {
        let motion = params.motion();
        Self {
            state: motion.state(0.0),
            base_ring: Vec::with_capacity(params.num_points),
            delayed_ring: Vec::with_capacity(params.num_points),
            motion,
            params,
            config: ConfigEpoch::default(),
            clock: SimulationClock::new(),
            plot: PlotRecorder::new(),
            selected: None,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn set_params(&mut self, params: Params) -> Result<(), UndulateError> {
        params.validate()?;
        self.params = params;
        self.config.mark();
        Ok(())
    }

    pub fn motion(&self) -> &CircularMotion {
        &self.motion
    }

    /// Position, velocity and acceleration of the reference point.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Ring with no extra delay.
    pub fn base_ring(&self) -> &[RingPoint] {
        &self.base_ring
    }

    /// Ring delayed by one full period.
    pub fn delayed_ring(&self) -> &[RingPoint] {
        &self.delayed_ring
    }

    pub fn plot(&self) -> &[PlotSample] {
        self.plot.samples()
    }

    /// Rotation so far as a degree readout.
    pub fn angle_deg(&self) -> f64 {
        angle_readout_deg(self.clock.time(), self.params.period)
    }

    pub fn cycles(&self) -> CycleCount {
        CycleCount::at(self.clock.time(), self.params.period)
    }

    /// Select ring point `index` for phase comparison against point 0.
    pub fn select_point(&mut self, index: usize) -> Result<PhaseComparison, UndulateError> {
        if index == 0 || index >= self.params.num_points {
            return Err(UndulateError::InvalidConfig(format!(
                "ring point {} (expected 1..{})",
                index, self.params.num_points
            )));
        }
        let radians = phase_difference(index, self.params.num_points);
        let comparison = PhaseComparison {
            index,
            radians,
            degrees: rad_to_deg(radians),
        };
        self.selected = Some(comparison);
        Ok(comparison)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&PhaseComparison> {
        self.selected.as_ref()
    }

    fn rebuild(&mut self) {
        self.motion = self.params.motion();
        self.clock
            .set_wrap_period(Some(WRAP_CYCLES * self.params.period));
        self.plot.clear();
        if self
            .selected
            .is_some_and(|s| s.index >= self.params.num_points)
        {
            self.selected = None;
        }
        tracing::info!(epoch = self.config.epoch(), params = %self.params, "circular motion configured");
    }

    fn recompute(&mut self) {
        let t = self.clock.time();
        let n = self.params.num_points;
        self.state = self.motion.state(t);
        self.motion.ring_into(t, n, 0.0, &mut self.base_ring);
        self.motion
            .ring_into(t, n, self.params.period, &mut self.delayed_ring);
        let value = self.params.quantity.value(&self.state);
        if self.plot.record(t, self.params.period, value) {
            tracing::trace!(t, value, "plot sample");
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
    angle_deg: f64,
    cycles: CycleCount,
    state: &'a MotionState,
    peak: f64,
    plot_samples: usize,
    active_points: usize,
    selected: Option<&'a PhaseComparison>,
}

impl Demo for Circular {
    fn name(&self) -> &'static str {
        "circular"
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
        self.plot.clear();
        self.selected = None;
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
            "period" => next.period = parse_f64(name, value)?,
            "radius" => next.radius = parse_f64(name, value)?,
            "num_points" => next.num_points = parse_usize(name, value)?,
            "rotation" => next.rotation = parse_f64(name, value)?,
            "quantity" => {
                next.quantity = Quantity::from_name(value).ok_or_else(|| {
                    UndulateError::InvalidConfig(format!(
                        "quantity = '{}' (expected position, velocity or acceleration)",
                        value
                    ))
                })?
            }
            _ => return Err(unknown_param("circular", name, &self.list_params())),
        }
        self.set_params(next)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("period", format!("{:.2}", self.params.period)),
            ("radius", format!("{:.0}", self.params.radius)),
            ("num_points", self.params.num_points.to_string()),
            ("rotation", format!("{:.0}", self.params.rotation)),
            ("quantity", self.params.quantity.name().to_string()),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("period", "Period", 0.5, 10.0, 0.1)
                .with_description("Time for one revolution"),
            ParamSpec::slider("radius", "Radius", 10.0, 120.0, 1.0)
                .with_description("Circle radius (amplitude)"),
            ParamSpec::int("num_points", "Points", Some(1), Some(MAX_POINTS as i64))
                .with_description("Oscillators per ring"),
            ParamSpec::slider("rotation", "Rotation", 0.0, 90.0, 1.0)
                .with_description("Tilt of the circle; 90 shows simple-harmonic motion"),
            ParamSpec::select("quantity", "Plot", vec!["position", "velocity", "acceleration"])
                .with_description("Quantity traced by the plot"),
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
            angle_deg: self.angle_deg(),
            cycles: self.cycles(),
            state: &self.state,
            peak: self.params.quantity.peak(&self.motion),
            plot_samples: self.plot.samples().len(),
            active_points: self.base_ring.iter().filter(|p| p.active).count(),
            selected: self.selected.as_ref(),
        };
        Ok(serde_json::to_value(summary)?)
    }
}
