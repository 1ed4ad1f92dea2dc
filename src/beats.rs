//! # Phasors and Beats
//!
//! Two rotating phasors and the traveling waves they trace, drawn side by
//! side so the combined phasor can be read off as the sum of the waves.
//!
//! ## Formula
//!
//! ```text
//! angle_i(t) = -2π f_i t + φ_i
//! phasor_i   = R (cos angle_i, sin angle_i)
//! combined   = phasor_1 + phasor_2
//!
//! x_j        = (j / (M - 1) - 0.5) W                     j = 0..M
//! y_i(x, t)  = R sin(2π f_i (x / W / scale / 10 - t) + φ_i)
//! Y(x, t)    = y_1 + y_2
//! ```
//!
//! The centre sample of `Y` is the tracked point: it rises and falls with
//! the combined phasor's vertical component.

use serde::Serialize;

use crate::geometry::Vec2;
use crate::shader::deg_to_rad;
use std::f64::consts::TAU;

/// One rotating phasor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Phasor {
    /// Revolutions per unit time.
    pub frequency: f64,
    /// Phase in degrees.
    pub phase_deg: f64,
    pub radius: f64,
}

impl Phasor {
    pub fn new(frequency: f64, phase_deg: f64, radius: f64) -> Self {
        Self {
            frequency,
            phase_deg,
            radius,
        }
    }

    #[inline]
    pub fn angle(&self, t: f64) -> f64 {
        -TAU * self.frequency * t + deg_to_rad(self.phase_deg)
    }

    #[inline]
    pub fn position(&self, t: f64) -> Vec2 {
        let a = self.angle(t);
        Vec2::new(self.radius * a.cos(), self.radius * a.sin())
    }

    /// Wave height at horizontal offset `x` in a window of `width`.
    #[inline]
    pub fn wave_at(&self, x: f64, t: f64, width: f64, scale: f64) -> f64 {
        let arg = TAU * self.frequency * (x / width / scale / 10.0 - t) + deg_to_rad(self.phase_deg);
        self.radius * arg.sin()
    }
}

/// Instantaneous phasor positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasorState {
    pub first: Vec2,
    pub second: Vec2,
    pub combined: Vec2,
}

/// Sampling window for the traveling waveforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveWindow {
    pub width: f64,
    pub samples: usize,
    pub scale: f64,
}

impl WaveWindow {
    /// Horizontal offset of sample `j`, centred on zero.
    #[inline]
    pub fn x(&self, j: usize) -> f64 {
        if self.samples < 2 {
            return 0.0;
        }
        (j as f64 / (self.samples - 1) as f64 - 0.5) * self.width
    }

    #[inline]
    pub fn centre(&self) -> usize {
        self.samples / 2
    }
}

/// Waveform buffers, reused across frames.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BeatFrame {
    pub xs: Vec<f64>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub combined: Vec<f64>,
}

impl BeatFrame {
    /// Height of the combined wave at the window centre.
    pub fn tracked(&self, window: &WaveWindow) -> Option<f64> {
        self.combined.get(window.centre()).copied()
    }
}

/// A pair of phasors and their superposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasorPair {
    pub first: Phasor,
    pub second: Phasor,
}

impl PhasorPair {
    pub fn new(first: Phasor, second: Phasor) -> Self {
        Self { first, second }
    }

    pub fn state(&self, t: f64) -> PhasorState {
        let first = self.first.position(t);
        let second = self.second.position(t);
        PhasorState {
            first,
            second,
            combined: first + second,
        }
    }

    /// Envelope frequency `|f1 - f2|`.
    pub fn beat_frequency(&self) -> f64 {
        (self.first.frequency - self.second.frequency).abs()
    }

    /// Overwrite `frame` with both waveforms and their sum at time `t`.
    pub fn fill(&self, t: f64, window: &WaveWindow, frame: &mut BeatFrame) {
        let n = window.samples;
        for buf in [
            &mut frame.xs,
            &mut frame.first,
            &mut frame.second,
            &mut frame.combined,
        ] {
            buf.resize(n, 0.0);
        }
        for j in 0..n {
            let x = window.x(j);
            let a = self.first.wave_at(x, t, window.width, window.scale);
            let b = self.second.wave_at(x, t, window.width, window.scale);
            frame.xs[j] = x;
            frame.first[j] = a;
            frame.second[j] = b;
            frame.combined[j] = a + b;
        }
    }
}
