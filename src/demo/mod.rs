//! # Demonstrations
//!
//! Each demonstration wires a [`SimulationClock`] to one of the physics
//! evaluators and owns the per-frame output buffers. The host calls
//! [`Demo::tick`] once per frame and reads the buffers between ticks.
//!
//! Configuration goes through a string-keyed surface (`set_param`,
//! `list_params`, `param_specs`) so a UI collaborator can build controls
//! without knowing the concrete type. A successful `set_param` marks the
//! configuration dirty; the next tick rebuilds the evaluator wholesale.
//!
//! ## Adding a New Demo
//!
//! 1. Create `src/demo/mydemo.rs` with a struct implementing [`Demo`]
//! 2. Add `pub mod mydemo;` below
//! 3. Add to [`DEMOS`] and [`by_name`]

pub mod beats;
pub mod circular;
pub mod interference;
pub mod refraction;

use serde::Serialize;

use crate::clock::{ClockStep, SimulationClock};
use crate::error::UndulateError;
use crate::field::FieldGrid;

/// All available demos, in display order.
pub const DEMOS: &[&str] = &["interference", "refraction", "circular", "beats"];

/// Trait for frame-driven demonstrations.
pub trait Demo: Send {
    /// Demo name (lowercase, e.g., "interference").
    fn name(&self) -> &'static str;

    fn clock(&self) -> &SimulationClock;

    fn clock_mut(&mut self) -> &mut SimulationClock;

    /// Advance by `dt` seconds and recompute the frame.
    ///
    /// A paused clock skips recomputation unless the configuration changed.
    fn tick(&mut self, dt: f64) -> ClockStep;

    /// Rewind to t = 0 and drop probe and plot history.
    fn reset(&mut self);

    fn time(&self) -> f64 {
        self.clock().time()
    }

    fn set_running(&mut self, running: bool) {
        self.clock_mut().set_running(running);
    }

    /// Monotonic counter of accepted configuration changes.
    fn epoch(&self) -> u64;

    /// One-line description of the current parameters.
    fn params_description(&self) -> String;

    fn set_param(&mut self, name: &str, value: &str) -> Result<(), UndulateError>;

    fn list_params(&self) -> Vec<(&'static str, String)>;

    fn param_specs(&self) -> Vec<ParamSpec>;

    /// Replace the parameters with a randomized valid set.
    fn randomize(&mut self);

    /// Frame snapshot for the CLI and other outer surfaces.
    fn summary(&self) -> Result<serde_json::Value, UndulateError>;

    /// Grid buffers, for demos that evaluate a 2-D field.
    fn field(&self) -> Option<&FieldGrid> {
        None
    }
}

/// Get a demo by name.
pub fn by_name(name: &str) -> Option<Box<dyn Demo>> {
    match name.to_lowercase().as_str() {
        "interference" | "wave" => Some(Box::new(interference::Interference::default())),
        "refraction" => Some(Box::new(refraction::Refraction::default())),
        "circular" | "shm" => Some(Box::new(circular::Circular::default())),
        "beats" | "phasor" => Some(Box::new(beats::Beats::default())),
        _ => None,
    }
}

/// Like [`by_name`], but reports unknown names as an error.
pub fn require(name: &str) -> Result<Box<dyn Demo>, UndulateError> {
    by_name(name).ok_or_else(|| {
        UndulateError::UnknownDemo(format!("'{}'. Available: {}", name, DEMOS.join(", ")))
    })
}

/// Control kind for a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    Slider { min: f64, max: f64, step: f64 },
    Int { min: Option<i64>, max: Option<i64> },
    Select { options: Vec<&'static str> },
}

/// UI descriptor for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl ParamSpec {
    fn new(name: &'static str, label: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            label,
            kind,
            description: None,
        }
    }

    pub fn slider(name: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self::new(name, label, ParamKind::Slider { min, max, step })
    }

    pub fn int(name: &'static str, label: &'static str, min: Option<i64>, max: Option<i64>) -> Self {
        Self::new(name, label, ParamKind::Int { min, max })
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<&'static str>) -> Self {
        Self::new(name, label, ParamKind::Select { options })
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Dirty flag plus epoch counter for the configuration-changed transition.
///
/// Starts dirty so the first tick always builds the evaluator.
#[derive(Debug, Clone)]
pub struct ConfigEpoch {
    epoch: u64,
    dirty: bool,
}

impl Default for ConfigEpoch {
    fn default() -> Self {
        Self {
            epoch: 0,
            dirty: true,
        }
    }
}

impl ConfigEpoch {
    pub fn mark(&mut self) {
        self.epoch += 1;
        self.dirty = true;
    }

    /// Count a change that was applied in place and needs no rebuild.
    pub fn bump(&mut self) {
        self.epoch += 1;
    }

    /// Consume the dirty flag.
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

pub(crate) fn parse_f64(name: &str, value: &str) -> Result<f64, UndulateError> {
    let v = value
        .trim()
        .parse::<f64>()
        .map_err(|e| UndulateError::InvalidConfig(format!("{} = '{}': {}", name, value, e)))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(UndulateError::invalid(name, v, "a finite number"))
    }
}

pub(crate) fn parse_usize(name: &str, value: &str) -> Result<usize, UndulateError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| UndulateError::InvalidConfig(format!("{} = '{}': {}", name, value, e)))
}

pub(crate) fn unknown_param(demo: &str, name: &str, available: &[(&'static str, String)]) -> UndulateError {
    let names: Vec<&str> = available.iter().map(|(n, _)| *n).collect();
    UndulateError::UnknownParam(format!(
        "'{}' for {}. Available: {}",
        name,
        demo,
        names.join(", ")
    ))
}

/// Reject values outside `(0, ∞)`.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), UndulateError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(UndulateError::invalid(name, value, "> 0"))
    }
}

/// Reject values outside `[0, ∞)`.
pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<(), UndulateError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(UndulateError::invalid(name, value, ">= 0"))
    }
}

pub(crate) fn require_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), UndulateError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(UndulateError::invalid(name, value, &format!("{}..={}", min, max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_demos_resolve() {
        for name in DEMOS {
            let demo = by_name(name).unwrap();
            assert_eq!(demo.name(), *name);
        }
        assert!(by_name("Interference").is_some());
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn test_require_lists_demos() {
        let err = require("nope").err().unwrap();
        assert!(err.to_string().contains("interference, refraction, circular, beats"));
    }

    #[test]
    fn test_param_specs_cover_list_params() {
        for name in DEMOS {
            let demo = by_name(name).unwrap();
            let mut listed: Vec<&str> = demo.list_params().iter().map(|(n, _)| *n).collect();
            let mut specced: Vec<&str> = demo.param_specs().iter().map(|s| s.name).collect();
            listed.sort_unstable();
            specced.sort_unstable();
            assert_eq!(listed, specced, "{}", name);
        }
    }

    #[test]
    fn test_config_epoch() {
        let mut config = ConfigEpoch::default();
        assert!(config.take());
        assert!(!config.take());
        config.mark();
        config.mark();
        assert_eq!(config.epoch(), 2);
        assert!(config.is_dirty());
        assert!(config.take());
    }

    #[test]
    fn test_param_spec_json() {
        let spec = ParamSpec::slider("period", "Period", 0.1, 5.0, 0.1).with_description("Wave period");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "slider");
        assert_eq!(json["max"], 5.0);
        assert_eq!(json["description"], "Wave period");
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_f64("period", " 1.5 ").unwrap(), 1.5);
        assert!(parse_f64("period", "inf").is_err());
        assert!(parse_f64("period", "abc").is_err());
        assert_eq!(parse_usize("resolution", "200").unwrap(), 200);
        assert!(parse_usize("resolution", "-1").is_err());
    }
}
