//! # Refraction
//!
//! One source to the left of a vertical boundary, evaluated over the sample
//! grid. Medium 1 (`x <= boundary_x`) has index `n1`, medium 2 has `n2`.
//!
//! Samples in the total-internal-reflection shadow carry no wave and are
//! shaded [`Shade::Undefined`](crate::field::Shade::Undefined).

use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::time::Instant;

use super::{
    ConfigEpoch, Demo, ParamSpec, parse_f64, parse_usize, require_non_negative, require_positive,
    require_range, unknown_param,
};
use crate::clock::{ClockStep, SimulationClock};
use crate::error::UndulateError;
use crate::field::grid::{DEFAULT_EXTENT, MAX_RESOLUTION};
use crate::field::{FieldGrid, RefractionField, RefractionMedium, WaveSource};
use crate::geometry::Vec2;
use crate::shader::rad_to_deg;

/// Parameters for the refraction demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    /// Oscillation period. Default: 1.0
    pub period: f64,
    /// Refractive index left of the boundary. Default: 1.0
    pub n1: f64,
    /// Refractive index right of the boundary. Default: 1.5
    pub n2: f64,
    /// Boundary position. Default: 0.0
    pub boundary_x: f64,
    /// Source position on the x axis. Default: -20.0
    pub source_x: f64,
    /// Grid cells per side. Default: 200
    pub resolution: usize,
    /// Displacements below this magnitude render black. Default: 0.0
    pub black_threshold: f64,
    /// Exponential decay with distance. Default: 0.0
    pub attenuation: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            period: 1.0,
            n1: 1.0,
            n2: 1.5,
            boundary_x: 0.0,
            source_x: -20.0,
            resolution: 200,
            black_threshold: 0.0,
            attenuation: 0.0,
        }
    }
}

impl Params {
    /// Generate a randomized but valid configuration.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            period: rng.random_range(0.5..3.0),
            n1: rng.random_range(1.0..2.0),
            n2: rng.random_range(1.0..2.5),
            boundary_x: rng.random_range(-10.0..10.0),
            source_x: rng.random_range(-30.0..-15.0),
            resolution: 200,
            black_threshold: rng.random_range(0.0..0.3),
            attenuation: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), UndulateError> {
        let half = DEFAULT_EXTENT / 2.0;
        require_positive("period", self.period)?;
        if self.n1 < 1.0 {
            return Err(UndulateError::invalid("n1", self.n1, ">= 1"));
        }
        if self.n2 < 1.0 {
            return Err(UndulateError::invalid("n2", self.n2, ">= 1"));
        }
        require_range("boundary_x", self.boundary_x, -half, half)?;
        require_range("source_x", self.source_x, -half, half)?;
        require_range("resolution", self.resolution as f64, 1.0, MAX_RESOLUTION as f64)?;
        require_non_negative("black_threshold", self.black_threshold)?;
        require_non_negative("attenuation", self.attenuation)?;
        Ok(())
    }

    pub fn model(&self) -> RefractionField {
        RefractionField::new(
            WaveSource::new(Vec2::new(self.source_x, 0.0), self.period),
            RefractionMedium::from_indices(self.n1, self.n2, self.boundary_x),
        )
        .with_attenuation(self.attenuation)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period={:.2} n1={:.2} n2={:.2} boundary={:.1} source={:.1} res={} black={:.2}",
            self.period,
            self.n1,
            self.n2,
            self.boundary_x,
            self.source_x,
            self.resolution,
            self.black_threshold
        )
    }
}

/// Refraction demo state and per-frame buffers.
#[derive(Debug, Clone)]
pub struct Refraction {
    params: Params,
    config: ConfigEpoch,
    clock: SimulationClock,
    model: RefractionField,
    grid: FieldGrid,
}

impl Default for Refraction {
    fn default() -> Self {
        Self::build(Params::default())
    }
}

impl Refraction {
    pub fn new(params: Params) -> Result<Self, UndulateError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    pub fn random() -> Self {
        Self::build(Params::random())
    }

    fn build(params: Params) -> Self {
        Self {
            grid: FieldGrid::new(params.resolution, DEFAULT_EXTENT),
            model: params.model(),
            params,
            config: ConfigEpoch::default(),
            clock: SimulationClock::new(),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

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
            tracing::debug!(black_threshold = self.params.black_threshold, "refraction reclassified");
        } else {
            self.config.mark();
        }
        Ok(())
    }

    pub fn model(&self) -> &RefractionField {
        &self.model
    }

    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    fn rebuild(&mut self) {
        self.model = self.params.model();
        self.grid.resize(self.params.resolution);
        tracing::info!(epoch = self.config.epoch(), params = %self.params, "refraction configured");
        if let Some(critical) = self.model.medium.critical_angle() {
            tracing::debug!(critical_deg = rad_to_deg(critical), "total internal reflection possible");
        }
    }

    fn recompute(&mut self) {
        let started = Instant::now();
        let t = self.clock.time();
        self.grid.evaluate(&self.model, t, self.params.black_threshold);
        tracing::debug!(
            t,
            samples = self.grid.len(),
            undefined = self.grid.undefined_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "refraction frame"
        );
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    demo: &'static str,
    time: f64,
    running: bool,
    epoch: u64,
    params: &'a Params,
    medium: RefractionMedium,
    critical_angle_deg: Option<f64>,
    samples: usize,
    undefined_samples: usize,
    displacement_range: Option<(f32, f32)>,
}

impl Demo for Refraction {
    fn name(&self) -> &'static str {
        "refraction"
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
            "period" => next.period = parse_f64(name, value)?,
            "n1" => next.n1 = parse_f64(name, value)?,
            "n2" => next.n2 = parse_f64(name, value)?,
            "boundary_x" => next.boundary_x = parse_f64(name, value)?,
            "source_x" => next.source_x = parse_f64(name, value)?,
            "resolution" => next.resolution = parse_usize(name, value)?,
            "black_threshold" => next.black_threshold = parse_f64(name, value)?,
            "attenuation" => next.attenuation = parse_f64(name, value)?,
            _ => return Err(unknown_param("refraction", name, &self.list_params())),
        }
        self.set_params(next)
    }

    fn list_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("period", format!("{:.2}", self.params.period)),
            ("n1", format!("{:.2}", self.params.n1)),
            ("n2", format!("{:.2}", self.params.n2)),
            ("boundary_x", format!("{:.1}", self.params.boundary_x)),
            ("source_x", format!("{:.1}", self.params.source_x)),
            ("resolution", self.params.resolution.to_string()),
            ("black_threshold", format!("{:.2}", self.params.black_threshold)),
            ("attenuation", format!("{:.1}", self.params.attenuation)),
        ]
    }

    fn param_specs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::slider("period", "Period", 0.1, 5.0, 0.1)
                .with_description("Oscillation period"),
            ParamSpec::slider("n1", "Index 1", 1.0, 3.0, 0.01)
                .with_description("Refractive index left of the boundary"),
            ParamSpec::slider("n2", "Index 2", 1.0, 3.0, 0.01)
                .with_description("Refractive index right of the boundary"),
            ParamSpec::slider("boundary_x", "Boundary", -35.0, 35.0, 0.5)
                .with_description("Boundary position"),
            ParamSpec::slider("source_x", "Source X", -35.0, 35.0, 0.5)
                .with_description("Source position"),
            ParamSpec::int("resolution", "Resolution", Some(1), Some(MAX_RESOLUTION as i64))
                .with_description("Grid cells per side"),
            ParamSpec::slider("black_threshold", "Black Threshold", 0.0, 2.0, 0.01)
                .with_description("Paint small displacements black"),
            ParamSpec::slider("attenuation", "Attenuation", 0.0, 100.0, 1.0)
                .with_description("Amplitude decay with distance"),
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
            medium: self.model.medium,
            critical_angle_deg: self.model.medium.critical_angle().map(rad_to_deg),
            samples: self.grid.len(),
            undefined_samples: self.grid.undefined_count(),
            displacement_range: self.grid.range(),
        };
        Ok(serde_json::to_value(summary)?)
    }

    fn field(&self) -> Option<&FieldGrid> {
        Some(&self.grid)
    }
}
