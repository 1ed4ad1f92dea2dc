//! # Simulation Clock
//!
//! Explicit replacement for an animation-frame callback: the host scheduler
//! calls [`SimulationClock::advance`] once per frame with the elapsed wall
//! time, and everything downstream reads [`SimulationClock::time`].
//!
//! ```text
//! running:  time += max(dt, 0) * speed
//! wrapped:  time  = time mod wrap_period       (bounded three-cycle views)
//! paused:   time unchanged, no recompute
//! ```

use serde::Serialize;

/// What a call to [`SimulationClock::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStep {
    /// Clock is paused; time is frozen and the last frame stays valid.
    Paused,
    /// Time moved forward.
    Advanced,
    /// Time moved forward past the wrap period and was folded back.
    Wrapped,
}

impl ClockStep {
    /// True when downstream state must be recomputed.
    #[inline]
    pub fn is_live(self) -> bool {
        !matches!(self, ClockStep::Paused)
    }
}

/// Monotonic (optionally wrapping) simulation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationClock {
    time: f64,
    speed: f64,
    running: bool,
    wrap_period: Option<f64>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    /// A running clock at unit speed with no wrap.
    pub fn new() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            running: true,
            wrap_period: None,
        }
    }

    /// Set the time multiplier. Non-positive or non-finite speeds are ignored.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    /// Fold time back into `[0, period)` on every advance.
    pub fn with_wrap(mut self, period: f64) -> Self {
        self.set_wrap_period(Some(period));
        self
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn wrap_period(&self) -> Option<f64> {
        self.wrap_period
    }

    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            tracing::warn!(speed, "ignoring non-positive clock speed");
        }
    }

    /// Configure (or clear) the wrap period.
    ///
    /// A non-positive period disables wrapping. The current time is folded
    /// immediately so the `[0, period)` invariant holds between ticks too.
    pub fn set_wrap_period(&mut self, period: Option<f64>) {
        self.wrap_period = period.filter(|p| p.is_finite() && *p > 0.0);
        if let Some(p) = self.wrap_period {
            self.time = self.time.rem_euclid(p);
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip between running and paused, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advance by `dt` seconds of wall time.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f64) -> ClockStep {
        if !self.running {
            return ClockStep::Paused;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let next = self.time + dt * self.speed;

        match self.wrap_period {
            Some(period) if next >= period => {
                self.time = next.rem_euclid(period);
                ClockStep::Wrapped
            }
            _ => {
                self.time = next;
                ClockStep::Advanced
            }
        }
    }

    /// Rewind to zero. Running state is preserved.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_by_speed() {
        let mut clock = SimulationClock::new().with_speed(2.0);
        assert_eq!(clock.advance(0.25), ClockStep::Advanced);
        assert!((clock.time() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut clock = SimulationClock::new();
        clock.advance(1.0);
        clock.advance(-5.0);
        assert!((clock.time() - 1.0).abs() < 1e-12);
        clock.advance(f64::NAN);
        assert!((clock.time() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_paused_freezes_time() {
        let mut clock = SimulationClock::new();
        clock.advance(0.3);
        clock.set_running(false);
        assert_eq!(clock.advance(10.0), ClockStep::Paused);
        assert!((clock.time() - 0.3).abs() < 1e-12);
        assert!(!ClockStep::Paused.is_live());
    }

    #[test]
    fn test_wrap_three_periods() {
        let period = 0.7;
        let mut clock = SimulationClock::new().with_wrap(3.0 * period);
        let mut wrapped = false;
        for _ in 0..500 {
            if clock.advance(0.016) == ClockStep::Wrapped {
                wrapped = true;
            }
            assert!(clock.time() >= 0.0 && clock.time() < 3.0 * period);
        }
        assert!(wrapped);
    }

    #[test]
    fn test_wrap_large_step() {
        let mut clock = SimulationClock::new().with_wrap(3.0);
        assert_eq!(clock.advance(10.5), ClockStep::Wrapped);
        assert!((clock.time() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_setting_wrap_folds_current_time() {
        let mut clock = SimulationClock::new();
        clock.advance(7.0);
        clock.set_wrap_period(Some(3.0));
        assert!((clock.time() - 1.0).abs() < 1e-12);
        clock.set_wrap_period(Some(0.0));
        assert_eq!(clock.wrap_period(), None);
    }

    #[test]
    fn test_reset_keeps_running_state() {
        let mut clock = SimulationClock::new();
        clock.advance(2.0);
        clock.set_running(false);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.is_running());
        assert!(clock.toggle());
    }

    #[test]
    fn test_invalid_speed_ignored() {
        let mut clock = SimulationClock::new();
        clock.set_speed(0.0);
        clock.set_speed(-1.0);
        assert_eq!(clock.speed(), 1.0);
    }
}
