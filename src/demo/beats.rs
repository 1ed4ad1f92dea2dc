//! # Phasor Superposition
//!
//! Two phasors with independent frequency and phase, their vector sum, and
//! the traveling waves they trace. Equal frequencies show steady
//! constructive or destructive interference depending on the phase
//! difference; unequal frequencies show beats.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use super::{
    ConfigEpoch, Demo, ParamSpec, parse_f64, parse_usize, require_positive, require_range,
    unknown_param,
};
use crate::beats::{BeatFrame, Phasor, PhasorPair, PhasorState, WaveWindow};
use crate::clock::{ClockStep, SimulationClock};
use crate::error::UndulateError;

/// Simulation time per wall-clock second at speed 1.
///
/// The frequencies are in the hundreds, so time runs very slowly: 0.00004
/// per frame at 60 frames per second.
pub const TIME_SCALE: f64 = 0.00004 * 60.0;

/// Parameters for the phasor demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    /// Frequency of wave 1. Default: 100.0
    pub frequency1: f64,
    /// Frequency of wave 2. Default: 100.0
    pub frequency2: f64,
    /// Phase of wave 1 in degrees. Default: 0.0
    pub phase1: f64,
    /// Phase of wave 2 in degrees. Default: 0.0
    pub phase2: f64,
    /// Animation speed multiplier. Default: 1.0
    pub speed: f64,
    /// Horizontal stretch of the waveforms. Default: 1.0
    pub scale: f64,
    /// Phasor radius and wave amplitude. Default: 60.0
    pub radius: f64,
    /// Waveform samples. Default: 500
    pub samples: usize,
    /// Waveform window width. Default: 900.0
    pub width: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            frequency1: 100.0,
            frequency2: 100.0,
            phase1: 0.0,
            phase2: 0.0,
            speed: 1.0,
            scale: 1.0,
            radius: 60.0,
            samples: 500,
            width: 900.0,
        }
    }
}

impl Params {
    /// Generate a randomized but valid configuration.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let frequency1 = rng.random_range(50.0..150.0);
        Self {
            frequency1,
            frequency2: frequency1 + rng.random_range(-10.0..10.0),
            phase1: 0.0,
            phase2: rng.random_range(0.0..360.0),
            speed: rng.random_range(0.5..3.0),
            scale: rng.random_range(0.5..2.0),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), UndulateError> {
        require_range("frequency1", self.frequency1, 0.0, 1000.0)?;
        require_range("frequency2", self.frequency2, 0.0, 1000.0)?;
        require_range("phase1", self.phase1, 0.0, 360.0)?;
        require_range("phase2", self.phase2, 0.0, 360.0)?;
        require_positive("speed", self.speed)?;
        require_positive("scale", self.scale)?;
        require_positive("radius", self.radius)?;
        require_positive("width", self.width)?;
        require_range("samples", self.samples as f64, 2.0, 10_000.0)?;
        Ok(())
    }

    pub fn pair(&self) -> PhasorPair {
        PhasorPair::new(
            Phasor::new(self.frequency1, self.phase1, self.radius),
            Phasor::new(self.frequency2, self.phase2, self.radius),
        )
    }

    pub fn window(&self) -> WaveWindow {
        WaveWindow {
            width: self.width,
            samples: self.samples,
            scale: self.scale,
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "f1={:.0} f2={:.0} phase1={:.0} phase2={:.0} speed={:.2} scale={:.2}",
            self.frequency1, self.frequency2, self.phase1, self.phase2, self.speed, self.scale
        )
    }
}

/// Phasor demo state and per-frame buffers.
#[derive(Debug, Clone)]
pub struct Beats {
    params: Params,
    config: ConfigEpoch,
    clock: SimulationClock,
    pair: PhasorPair,
    window: WaveWindow,
    state: PhasorState,
    frame: BeatFrame,
}

impl Default for Beats {
    fn default() -> Self {
        Self::build(Params::default())
    }
}

impl Beats {
    pub fn new(params: Params) -> Result<Self, UndulateError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    pub fn random() -> Self {
        Self::build(Params::random())
    }

    fn build(params: Params) -> Self {
        let pair = params.pair();
        Self {
            state: pair.state(0.0),
            window: params.window(),
            pair,
            params,
            config: ConfigEpoch::default(),
            clock: SimulationClock::new(),
            frame: BeatFrame::default(),
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

    pub fn phasors(&self) -> &PhasorState {
        &self.state
    }

    pub fn frame(&self) -> &BeatFrame {
        &self.frame
    }

    /// Combined wave height at the centre of the window.
    pub fn tracked(&self) -> Option<f64> {
        self.frame.tracked(&self.window)
    }

    fn rebuild(&mut self) {
        self.pair = self.params.pair();
        self.window = self.params.window();
        self.clock.set_speed(self.params.speed * TIME_SCALE);
        tracing::info!(epoch = self.config.epoch(), params = %self.params, "phasors configured");
    }

    fn recompute(&mut self) {
        let t = self.clock.time();
        self.state = self.pair.state(t);
        self.pair.fill(t, &self.window, &mut self.frame);
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    demo: &'static str,
    time: f64,
    running: bool,
    epoch: u64,
    params: &'a Params,
    phasors: &'a PhasorState,
    beat_frequency: f64,
    tracked: Option<f64>,
}

impl Demo for Beats {
    fn name(&self) -> &'static str {
        "beats"
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
            "frequency1" => next.frequency1 = parse_f64(name, value)?,
            "frequency2" => next.frequency2 = parse_f64(name, value)?,
            "phase1" => next.phase1 = parse_f64(name, value)?,
            "phase2" => next.phase2 = parse_f64(name, value)?,
            "speed" => next.speed = parse_f64(name, value)?,
            "scale" => next.scale = parse_f64(name, value)?,
            "samples" => next.samples = parse_usize(name, value)?,
            _ => return Err(unknown_param("beats", name, &self.list_params())),
        }
        self.set_params(next)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frequency1", format!("{:.0}", self.params.frequency1)),
            ("frequency2", format!("{:.0}", self.params.frequency2)),
            ("phase1", format!("{:.0}", self.params.phase1)),
            ("phase2", format!("{:.0}", self.params.phase2)),
            ("speed", format!("{:.2}", self.params.speed)),
            ("scale", format!("{:.2}", self.params.scale)),
            ("samples", self.params.samples.to_string()),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("frequency1", "Frequency 1", 1.0, 200.0, 1.0),
            ParamSpec::slider("frequency2", "Frequency 2", 1.0, 200.0, 1.0),
            ParamSpec::slider("phase1", "Phase 1", 0.0, 360.0, 1.0)
                .with_description("Phase of wave 1, degrees"),
            ParamSpec::slider("phase2", "Phase 2", 0.0, 360.0, 1.0)
                .with_description("Phase of wave 2, degrees"),
            ParamSpec::slider("speed", "Speed", 0.1, 5.0, 0.1)
                .with_description("Animation speed"),
            ParamSpec::slider("scale", "Scale", 0.1, 5.0, 0.1)
                .with_description("Horizontal stretch of the waveforms"),
            ParamSpec::int("samples", "Samples", Some(2), Some(2000)),
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
            phasors: &self.state,
            beat_frequency: self.pair.beat_frequency(),
            tracked: self.tracked(),
        };
        Ok(serde_json::to_value(summary)?)
    }
}
