//! # Circular Motion Projector
//!
//! Uniform circular motion and its projection onto one axis, which is
//! simple-harmonic motion. Also produces the "ring of oscillators" used to
//! show how a transverse wave front wakes points up one after another.
//!
//! ## Formula
//!
//! ```text
//! angle(t)      = -(t / T) * 2π + φ
//! ω             = 2π / T
//! position      = r * (cos a, sin a)
//! velocity      = ω r * (sin a, cos a)
//! acceleration  = -ω² r * (cos a, sin a)
//! ```
//!
//! Every vector is then passed through [`project_tilted`], which scales the
//! x-component by `cos(tilt)`. At 90° only the vertical component survives.
//!
//! The velocity's y-component follows the screen convention of the view it
//! feeds (y grows downwards), which is why it is `+ω r cos a` rather than the
//! textbook derivative.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::geometry::Vec2;
use crate::shader::{polar_to_cart, project_tilted, rad_to_deg};

/// Sampling density of the plot recorder, in samples per period.
pub const PLOT_SAMPLES_PER_PERIOD: f64 = 32.0;

/// Uniform circular motion seen at a tilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularMotion {
    /// Time for one revolution. Must be > 0.
    pub period: f64,
    /// Circle radius (amplitude of the projected oscillation).
    pub radius: f64,
    /// Phase at t = 0, radians.
    pub phase_offset: f64,
    /// Tilt of the circle's plane, degrees in [0, 90].
    pub tilt_deg: f64,
}

/// Full kinematic state at one instant, already projected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionState {
    pub angle: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// One oscillator on the delayed ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingPoint {
    pub index: usize,
    pub angle: f64,
    pub position: Vec2,
    /// False while the wave front has not reached this point yet.
    pub active: bool,
}

impl CircularMotion {
    pub fn new(period: f64, radius: f64) -> Self {
        Self {
            period,
            radius,
            phase_offset: 0.0,
            tilt_deg: 0.0,
        }
    }

    pub fn with_phase(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn with_tilt(mut self, tilt_deg: f64) -> Self {
        self.tilt_deg = tilt_deg;
        self
    }

    /// Angular speed ω = 2π / T.
    #[inline]
    pub fn omega(&self) -> f64 {
        TAU / self.period
    }

    #[inline]
    pub fn angle(&self, t: f64) -> f64 {
        -(t / self.period) * TAU + self.phase_offset
    }

    #[inline]
    fn project(&self, (x, y): (f64, f64)) -> Vec2 {
        let (x, y) = project_tilted(x, y, self.tilt_deg);
        Vec2::new(x, y)
    }

    fn position_at_angle(&self, angle: f64) -> Vec2 {
        self.project(polar_to_cart(self.radius, angle))
    }

    pub fn position(&self, t: f64) -> Vec2 {
        self.position_at_angle(self.angle(t))
    }

    pub fn velocity(&self, t: f64) -> Vec2 {
        let a = self.angle(t);
        let s = self.omega() * self.radius;
        self.project((s * a.sin(), s * a.cos()))
    }

    pub fn acceleration(&self, t: f64) -> Vec2 {
        let a = self.angle(t);
        let s = -self.omega() * self.omega() * self.radius;
        self.project((s * a.cos(), s * a.sin()))
    }

    pub fn state(&self, t: f64) -> MotionState {
        MotionState {
            angle: self.angle(t),
            position: self.position(t),
            velocity: self.velocity(t),
            acceleration: self.acceleration(t),
        }
    }

    /// Start delay of ring point `index` out of `count`: `(i / N) * T`.
    #[inline]
    pub fn delay(&self, index: usize, count: usize) -> f64 {
        (index as f64 / count as f64) * self.period
    }

    /// One ring point. Points whose delay (plus `offset`) has not elapsed
    /// sit at the rest angle, which is the phase at effective time zero.
    pub fn ring_point(&self, t: f64, index: usize, count: usize, offset: f64) -> RingPoint {
        let effective = (t - self.delay(index, count) - offset).max(0.0);
        let active = effective > 0.0;
        let angle = if active {
            self.angle(effective)
        } else {
            self.phase_offset
        };
        RingPoint {
            index,
            angle,
            position: self.position_at_angle(angle),
            active,
        }
    }

    /// Fill `out` with the whole ring, reusing its allocation.
    pub fn ring_into(&self, t: f64, count: usize, offset: f64, out: &mut Vec<RingPoint>) {
        out.clear();
        out.extend((0..count).map(|i| self.ring_point(t, i, count, offset)));
    }

    pub fn ring(&self, t: f64, count: usize, offset: f64) -> Vec<RingPoint> {
        let mut out = Vec::with_capacity(count);
        self.ring_into(t, count, offset, &mut out);
        out
    }
}

/// Phase lag of ring point `index` behind point 0, radians in [0, 2π).
pub fn phase_difference(index: usize, count: usize) -> f64 {
    ((index as f64 / count as f64) * TAU).rem_euclid(TAU)
}

/// Elapsed rotation as a degree readout in [0, 360).
pub fn angle_readout_deg(t: f64, period: f64) -> f64 {
    rad_to_deg((t / period) * TAU).rem_euclid(360.0)
}

/// Elapsed time expressed as whole periods plus eighths of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleCount {
    pub whole: u64,
    pub eighths: u8,
}

impl CycleCount {
    pub fn at(t: f64, period: f64) -> Self {
        let cycles = (t / period).max(0.0);
        Self {
            whole: cycles.floor() as u64,
            eighths: ((cycles * 8.0).floor() as u64 % 8) as u8,
        }
    }
}

/// Which kinematic quantity the plot follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    #[default]
    Position,
    Velocity,
    Acceleration,
}

impl Quantity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "position" | "displacement" => Some(Self::Position),
            "velocity" => Some(Self::Velocity),
            "acceleration" => Some(Self::Acceleration),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Acceleration => "acceleration",
        }
    }

    /// Vertical component of the chosen quantity.
    pub fn value(self, state: &MotionState) -> f64 {
        match self {
            Self::Position => state.position.y,
            Self::Velocity => state.velocity.y,
            Self::Acceleration => state.acceleration.y,
        }
    }

    /// Largest magnitude the quantity can reach: r, ωr or ω²r.
    pub fn peak(self, motion: &CircularMotion) -> f64 {
        let w = motion.omega();
        match self {
            Self::Position => motion.radius,
            Self::Velocity => w * motion.radius,
            Self::Acceleration => w * w * motion.radius,
        }
    }
}

/// One recorded plot point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotSample {
    pub time: f64,
    pub value: f64,
}

/// Time series of one quantity, sampled every `period / 32`.
///
/// Samples land at most once per interval, however the clock moves: a long
/// frame or a cleared trace does not make it catch up. Time running
/// backwards (a clock wrap or reset) starts a fresh trace.
#[derive(Debug, Clone, Default)]
pub struct PlotRecorder {
    samples: Vec<PlotSample>,
    last_time: f64,
    last_slot: Option<u64>,
}

impl PlotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample; it is kept only when a new interval has begun.
    ///
    /// Returns true when the sample was appended.
    pub fn record(&mut self, t: f64, period: f64, value: f64) -> bool {
        if t < self.last_time {
            self.samples.clear();
            self.last_slot = None;
        }
        self.last_time = t;

        let interval = period / PLOT_SAMPLES_PER_PERIOD;
        let slot = ((t + 1e-4) / interval).floor().max(0.0) as u64;
        let due = match self.last_slot {
            Some(last) => slot > last,
            None => slot >= 1,
        };
        if due {
            self.samples.push(PlotSample { time: t, value });
            self.last_slot = Some(slot);
        }
        due
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_time = 0.0;
        self.last_slot = None;
    }

    pub fn samples(&self) -> &[PlotSample] {
        &self.samples
    }
}
