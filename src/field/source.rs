//! # Point Sources and Superposition
//!
//! ## Formula
//!
//! ```text
//! d    = |p - source.position|
//! A(d) = base * exp(-d * attenuation / 300)
//! y    = A(d) * sin(d * k - ω t + φ),   k = 1 / period,  ω = speed
//! Y    = Σ y_i
//! ```
//!
//! The wavenumber is `1 / period` rather than `2π / λ`; the demonstrations
//! keep this convention so the slider values read directly.

use serde::{Deserialize, Serialize};

use super::FieldModel;
use crate::geometry::Vec2;
use crate::shader::{attenuate, traveling_sin};

/// Base amplitude of the demonstration sources.
pub const DEFAULT_AMPLITUDE: f64 = 2.0;

/// One oscillating point source.
///
/// Sources are replaced wholesale whenever the configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSource {
    pub position: Vec2,
    /// Oscillation period. Caller guarantees `period > 0`.
    pub period: f64,
    /// Phase offset in radians.
    pub phase_offset: f64,
    pub base_amplitude: f64,
}

impl WaveSource {
    pub fn new(position: Vec2, period: f64) -> Self {
        Self {
            position,
            period,
            phase_offset: 0.0,
            base_amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn with_phase(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.base_amplitude = amplitude;
        self
    }

    /// k = 1 / period.
    #[inline]
    pub fn wavenumber(&self) -> f64 {
        1.0 / self.period
    }

    #[inline]
    pub fn distance(&self, p: Vec2) -> f64 {
        self.position.distance(p)
    }

    #[inline]
    pub fn amplitude_at(&self, distance: f64, attenuation: f64) -> f64 {
        attenuate(self.base_amplitude, distance, attenuation)
    }

    /// Contribution of this source alone.
    #[inline]
    pub fn displacement(&self, p: Vec2, t: f64, attenuation: f64, omega: f64) -> f64 {
        let d = self.distance(p);
        self.amplitude_at(d, attenuation)
            * traveling_sin(d, self.wavenumber(), omega, t, self.phase_offset)
    }
}

/// Position plus displacement, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSample {
    pub position: Vec2,
    pub displacement: f64,
}

/// N independent sources summed linearly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSourceField {
    sources: Vec<WaveSource>,
    attenuation: f64,
    omega: f64,
}

impl PointSourceField {
    /// Empty field. `omega` is the angular rate (the demo's speed setting).
    pub fn new(attenuation: f64, omega: f64) -> Self {
        Self {
            sources: Vec::new(),
            attenuation,
            omega,
        }
    }

    pub fn with_source(mut self, source: WaveSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[WaveSource] {
        &self.sources
    }

    pub fn attenuation(&self) -> f64 {
        self.attenuation
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Replace the whole source set.
    pub fn set_sources(&mut self, sources: Vec<WaveSource>) {
        self.sources = sources;
    }

    /// Per-source contributions at `p`, in source order.
    pub fn contributions(&self, p: Vec2, t: f64) -> impl Iterator<Item = f64> + '_ {
        self.sources
            .iter()
            .map(move |s| s.displacement(p, t, self.attenuation, self.omega))
    }

    /// Superposed displacement: strict sum, no clipping or normalization.
    pub fn displacement(&self, p: Vec2, t: f64) -> f64 {
        self.contributions(p, t).sum()
    }

    /// Height of source `index`'s own oscillator (its displacement at d = 0).
    pub fn source_height(&self, index: usize, t: f64) -> Option<f64> {
        self.sources
            .get(index)
            .map(|s| s.displacement(s.position, t, self.attenuation, self.omega))
    }

    /// Displacement of one source along the straight path to `target`,
    /// written into `out`.
    ///
    /// Fills `segments + 1` samples, first at the source, last at `target`.
    /// Used to pull a single source's wave out of the superposition. An
    /// unknown `index` leaves `out` empty.
    pub fn profile_into(
        &self,
        index: usize,
        target: Vec2,
        t: f64,
        segments: usize,
        out: &mut Vec<FieldSample>,
    ) {
        out.clear();
        let Some(source) = self.sources.get(index) else {
            return;
        };
        let segments = segments.max(1);
        out.extend((0..=segments).map(|i| {
            let position = source.position.lerp(target, i as f64 / segments as f64);
            FieldSample {
                position,
                displacement: source.displacement(position, t, self.attenuation, self.omega),
            }
        }));
    }

    pub fn profile(&self, index: usize, target: Vec2, t: f64, segments: usize) -> Vec<FieldSample> {
        let mut out = Vec::with_capacity(segments.max(1) + 1);
        self.profile_into(index, target, t, segments, &mut out);
        out
    }
}

impl FieldModel for PointSourceField {
    #[inline]
    fn sample(&self, p: Vec2, t: f64) -> Option<f64> {
        Some(self.displacement(p, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (WaveSource, WaveSource) {
        (
            WaveSource::new(Vec2::new(10.0, 0.0), 1.0),
            WaveSource::new(Vec2::new(-10.0, 0.0), 1.0).with_phase(1.2),
        )
    }

    #[test]
    fn test_superposition_is_linear() {
        let (a, b) = pair();
        let both = PointSourceField::new(20.0, 2.0).with_source(a).with_source(b);
        let only_a = PointSourceField::new(20.0, 2.0).with_source(a);
        let only_b = PointSourceField::new(20.0, 2.0).with_source(b);

        for i in 0..40 {
            let p = Vec2::new(-30.0 + i as f64 * 1.7, 13.0 - i as f64 * 0.9);
            let t = i as f64 * 0.11;
            let sum = only_a.displacement(p, t) + only_b.displacement(p, t);
            assert!((both.displacement(p, t) - sum).abs() < 1e-12);
        }
    }

    #[test]
    fn test_three_sources_not_special_cased() {
        let (a, b) = pair();
        let c = WaveSource::new(Vec2::new(0.0, 15.0), 0.5).with_amplitude(1.0);
        let field = PointSourceField::new(5.0, 3.0)
            .with_source(a)
            .with_source(b)
            .with_source(c);
        let p = Vec2::new(3.0, -4.0);
        let expected: f64 = [a, b, c]
            .iter()
            .map(|s| s.displacement(p, 0.8, 5.0, 3.0))
            .sum();
        assert!((field.displacement(p, 0.8) - expected).abs() < 1e-12);
        assert_eq!(field.contributions(p, 0.8).count(), 3);
    }

    #[test]
    fn test_displacement_reproducible() {
        let (a, b) = pair();
        let field = PointSourceField::new(20.0, 2.0).with_source(a).with_source(b);
        let p = Vec2::new(7.5, -2.25);
        assert_eq!(field.displacement(p, 1.3), field.displacement(p, 1.3));
    }

    #[test]
    fn test_at_source_is_finite() {
        let (a, _) = pair();
        let y = a.displacement(a.position, 0.4, 50.0, 2.0);
        assert!(y.is_finite());
        assert!((y - 2.0 * (-0.8f64).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_attenuation_constant_amplitude() {
        let (a, _) = pair();
        for d in [0.0, 10.0, 1000.0] {
            assert_eq!(a.amplitude_at(d, 0.0), 2.0);
        }
    }

    #[test]
    fn test_source_height_matches_bobbing_formula() {
        let (a, b) = pair();
        let field = PointSourceField::new(20.0, 2.0).with_source(a).with_source(b);
        let t = 0.9;
        let h = field.source_height(1, t).unwrap();
        assert!((h - 2.0 * (-t * 2.0 + 1.2).sin()).abs() < 1e-12);
        assert_eq!(field.source_height(2, t), None);
    }

    #[test]
    fn test_profile_endpoints() {
        let (a, b) = pair();
        let field = PointSourceField::new(20.0, 2.0).with_source(a).with_source(b);
        let target = Vec2::new(0.0, 12.0);
        let profile = field.profile(0, target, 0.5, 100);
        assert_eq!(profile.len(), 101);
        assert_eq!(profile[0].position, a.position);
        assert!((profile[100].position - target).length() < 1e-12);
        let at_target = a.displacement(target, 0.5, 20.0, 2.0);
        assert!((profile[100].displacement - at_target).abs() < 1e-9);
        assert!(field.profile(5, target, 0.5, 100).is_empty());
    }

    #[test]
    fn test_profile_into_reuses_buffer() {
        let (a, b) = pair();
        let field = PointSourceField::new(20.0, 2.0).with_source(a).with_source(b);
        let target = Vec2::new(3.0, 12.0);
        let mut out = Vec::new();
        field.profile_into(1, target, 0.5, 100, &mut out);
        let capacity = out.capacity();
        let ptr = out.as_ptr();

        field.profile_into(1, target, 0.75, 100, &mut out);
        assert_eq!(out.len(), 101);
        assert_eq!(out.capacity(), capacity);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out, field.profile(1, target, 0.75, 100));

        field.profile_into(7, target, 0.75, 100, &mut out);
        assert!(out.is_empty());
    }
}
