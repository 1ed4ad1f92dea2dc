//! # Refraction Across a Planar Boundary
//!
//! One source, two homogeneous media separated by the vertical plane
//! `x = boundary_x`. Medium 1 is `x <= boundary_x`.
//!
//! ## Formula
//!
//! ```text
//! ω  = 2π / T
//! k1 = ω / speed1,   k2 = ω / speed2,   speed = 1 / n
//!
//! x <= b:  y = A(d) sin(k1 d - ω t + φ)                 d = |S - P|
//!
//! x >  b:  C    = (b, P.z)                              boundary point
//!          θi   = atan2(P.z - S.z, b - S.x)
//!          θr   = asin((speed2 / speed1) sin θi)        Snell's law
//!          l1   = |S - C|
//!          l2   = (P.x - b) cos θr                      refracted leg
//!          y    = A(l1 + l2) sin(k1 l1 + k2 l2 - ω t + φ)
//! ```
//!
//! The refracted leg is the sample's advance along the refracted direction.
//! At the boundary `l2 = 0`, so both branches agree exactly; with equal
//! indices they also agree to first order just past it.
//!
//! When `(speed2 / speed1) sin θi > 1` there is no transmitted wave (total
//! internal reflection) and the sample is reported as undefined.
//!
//! A source at or beyond the boundary already sits in medium 2; samples on
//! that side then see a direct wave with `k2`.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::{FieldModel, WaveSource};
use crate::geometry::Vec2;
use crate::shader::{attenuate, traveling_sin};

/// Which side of the boundary a sample lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    First,
    Second,
}

/// Two media separated by `x = boundary_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefractionMedium {
    pub boundary_x: f64,
    pub speed1: f64,
    pub speed2: f64,
}

impl RefractionMedium {
    /// Build from refractive indices (`speed = 1 / n`). Caller guarantees
    /// `n >= 1`.
    pub fn from_indices(n1: f64, n2: f64, boundary_x: f64) -> Self {
        Self {
            boundary_x,
            speed1: 1.0 / n1,
            speed2: 1.0 / n2,
        }
    }

    #[inline]
    pub fn medium_at(&self, x: f64) -> Medium {
        if x <= self.boundary_x {
            Medium::First
        } else {
            Medium::Second
        }
    }

    /// `speed2 / speed1`, equal to `n1 / n2`.
    #[inline]
    pub fn speed_ratio(&self) -> f64 {
        self.speed2 / self.speed1
    }

    /// Incident angle beyond which nothing is transmitted, if any.
    pub fn critical_angle(&self) -> Option<f64> {
        let ratio = self.speed_ratio();
        (ratio > 1.0).then(|| (1.0 / ratio).asin())
    }

    /// Snell's law. `None` beyond the critical angle.
    pub fn refracted_angle(&self, incident: f64) -> Option<f64> {
        let s = self.speed_ratio() * incident.sin();
        (s.abs() <= 1.0).then(|| s.asin())
    }
}

/// How the wave reaches a sample point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RayPath {
    /// Straight line from the source within one medium.
    Direct { medium: Medium, distance: f64 },
    /// Incident leg in medium 1, refracted leg in medium 2.
    Transmitted {
        incident: f64,
        refracted: f64,
        theta_i: f64,
        theta_r: f64,
    },
    /// Beyond the critical angle: no transmitted wave.
    Blocked { theta_i: f64 },
}

impl RayPath {
    /// Geometric length used for attenuation. `None` when blocked.
    pub fn length(&self) -> Option<f64> {
        match *self {
            RayPath::Direct { distance, .. } => Some(distance),
            RayPath::Transmitted {
                incident,
                refracted,
                ..
            } => Some(incident + refracted),
            RayPath::Blocked { .. } => None,
        }
    }
}

/// Single-source field with a refracting boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionField {
    pub source: WaveSource,
    pub medium: RefractionMedium,
    pub attenuation: f64,
}

impl RefractionField {
    pub fn new(source: WaveSource, medium: RefractionMedium) -> Self {
        Self {
            source,
            medium,
            attenuation: 0.0,
        }
    }

    pub fn with_attenuation(mut self, attenuation: f64) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// ω = 2π / T.
    #[inline]
    pub fn omega(&self) -> f64 {
        TAU / self.source.period
    }

    #[inline]
    pub fn wavenumber(&self, medium: Medium) -> f64 {
        match medium {
            Medium::First => self.omega() / self.medium.speed1,
            Medium::Second => self.omega() / self.medium.speed2,
        }
    }

    /// Angle between the boundary normal and the line from the source to
    /// the boundary point level with `p`.
    pub fn incident_angle(&self, p: Vec2) -> f64 {
        let s = self.source.position;
        (p.y - s.y).atan2(self.medium.boundary_x - s.x)
    }

    fn source_in_first(&self) -> bool {
        self.source.position.x < self.medium.boundary_x
    }

    /// Straight path from the source through a single medium.
    pub fn direct(&self, p: Vec2, medium: Medium) -> RayPath {
        RayPath::Direct {
            medium,
            distance: self.source.distance(p),
        }
    }

    /// Incident-then-refracted path to a point past the boundary.
    pub fn transmitted(&self, p: Vec2) -> RayPath {
        let b = self.medium.boundary_x;
        let theta_i = self.incident_angle(p);
        match self.medium.refracted_angle(theta_i) {
            None => RayPath::Blocked { theta_i },
            Some(theta_r) => RayPath::Transmitted {
                incident: self.source.distance(Vec2::new(b, p.y)),
                refracted: (p.x - b) * theta_r.cos(),
                theta_i,
                theta_r,
            },
        }
    }

    /// Pick the path for `p` according to which side it (and the source)
    /// lies on.
    pub fn trace(&self, p: Vec2) -> RayPath {
        match self.medium.medium_at(p.x) {
            Medium::First => self.direct(p, Medium::First),
            Medium::Second if self.source_in_first() => self.transmitted(p),
            Medium::Second => self.direct(p, Medium::Second),
        }
    }

    /// Displacement carried along a given path. `None` when blocked.
    pub fn displacement_along(&self, path: &RayPath, t: f64) -> Option<f64> {
        let omega = self.omega();
        let phase_path = match *path {
            RayPath::Direct { medium, distance } => distance * self.wavenumber(medium),
            RayPath::Transmitted {
                incident,
                refracted,
                ..
            } => {
                incident * self.wavenumber(Medium::First)
                    + refracted * self.wavenumber(Medium::Second)
            }
            RayPath::Blocked { .. } => return None,
        };
        let amplitude = attenuate(self.source.base_amplitude, path.length()?, self.attenuation);
        Some(amplitude * traveling_sin(phase_path, 1.0, omega, t, self.source.phase_offset))
    }

    pub fn displacement(&self, p: Vec2, t: f64) -> Option<f64> {
        self.displacement_along(&self.trace(p), t)
    }
}

impl FieldModel for RefractionField {
    #[inline]
    fn sample(&self, p: Vec2, t: f64) -> Option<f64> {
        self.displacement(p, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(n1: f64, n2: f64, boundary: f64) -> RefractionField {
        RefractionField::new(
            WaveSource::new(Vec2::new(-20.0, 0.0), 1.0),
            RefractionMedium::from_indices(n1, n2, boundary),
        )
    }

    #[test]
    fn test_continuity_equal_indices() {
        let f = field(1.3, 1.3, 0.0);
        for z in [-30.0, -8.0, 0.0, 5.5, 22.0] {
            for eps in [1e-6, 1e-4, 1e-3] {
                let p = Vec2::new(eps, z);
                for t in [0.0, 0.37, 1.9] {
                    let across = f.displacement_along(&f.transmitted(p), t).unwrap();
                    let straight = f.displacement_along(&f.direct(p, Medium::First), t).unwrap();
                    assert!(
                        (across - straight).abs() < 1e-4,
                        "z={} eps={} t={}: {} vs {}",
                        z,
                        eps,
                        t,
                        across,
                        straight
                    );
                }
            }
        }
    }

    #[test]
    fn test_exact_agreement_on_boundary() {
        // Different indices: the refracted leg vanishes at x = b
        let f = field(1.0, 1.7, 3.0);
        let p = Vec2::new(3.0, 11.0);
        let a = f.displacement_along(&f.transmitted(p), 0.6).unwrap();
        let b = f.displacement(p, 0.6).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_snell_slower_medium_bends_towards_normal() {
        let f = field(1.0, 1.5, 0.0);
        let p = Vec2::new(10.0, 20.0);
        match f.trace(p) {
            RayPath::Transmitted { theta_i, theta_r, .. } => {
                assert!(theta_r.abs() < theta_i.abs());
                let lhs = theta_r.sin();
                let rhs = (1.0 / 1.5) * theta_i.sin();
                assert!((lhs - rhs).abs() < 1e-12);
            }
            other => panic!("expected transmitted, got {:?}", other),
        }
    }

    #[test]
    fn test_total_internal_reflection_is_undefined() {
        // Faster second medium: critical angle asin(1/1.5) ≈ 41.8°
        let f = field(1.5, 1.0, 0.0);
        let critical = f.medium.critical_angle().unwrap();
        assert!((critical - (1.0f64 / 1.5).asin()).abs() < 1e-12);

        // Steep incidence: 30 units across vs 20 to the boundary
        let p = Vec2::new(5.0, 30.0);
        assert!(matches!(f.trace(p), RayPath::Blocked { .. }));
        assert_eq!(f.displacement(p, 0.2), None);

        // Shallow incidence still transmits
        let q = Vec2::new(5.0, 2.0);
        assert!(f.displacement(q, 0.2).unwrap().is_finite());
    }

    #[test]
    fn test_no_critical_angle_into_slower_medium() {
        assert_eq!(RefractionMedium::from_indices(1.0, 1.5, 0.0).critical_angle(), None);
    }

    #[test]
    fn test_first_medium_is_radial() {
        let f = field(1.0, 2.0, 0.0);
        let p = Vec2::new(-20.0, 7.0);
        let t = 0.45;
        let expected = 2.0 * (f.wavenumber(Medium::First) * 7.0 - f.omega() * t).sin();
        assert!((f.displacement(p, t).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_source_beyond_boundary_uses_second_medium() {
        let f = field(1.0, 2.0, -25.0);
        let p = Vec2::new(-20.0, 4.0);
        assert_eq!(
            f.trace(p),
            RayPath::Direct {
                medium: Medium::Second,
                distance: 4.0
            }
        );
    }

    #[test]
    fn test_wavenumbers() {
        let f = field(1.0, 1.5, 0.0);
        assert!((f.wavenumber(Medium::First) - TAU).abs() < 1e-12);
        assert!((f.wavenumber(Medium::Second) - TAU * 1.5).abs() < 1e-12);
    }
}
