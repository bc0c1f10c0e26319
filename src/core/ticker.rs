//! Timer-driven accumulators.
//!
//! The browser games advanced their state from `setInterval` callbacks.
//! Here the host calls `tick()` once per interval instead, which keeps the
//! simulators synchronous and replayable.

use serde::{Deserialize, Serialize};

/// Result of advancing a ticker by one interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tick {
    /// Still running; carries the new value.
    Running(f64),
    /// The threshold was reached on this tick; carries the final value.
    Reached(f64),
    /// Already terminal before this tick.
    Idle,
}

/// A counter that grows by `step` each tick until it reaches `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    value: f64,
    step: f64,
    threshold: f64,
    done: bool,
}

impl Accumulator {
    #[must_use]
    pub fn new(start: f64, step: f64, threshold: f64) -> Self {
        Self {
            value: start,
            step,
            threshold,
            done: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn tick(&mut self) -> Tick {
        if self.done {
            return Tick::Idle;
        }
        self.value += self.step;
        if self.value >= self.threshold {
            self.done = true;
            Tick::Reached(self.value)
        } else {
            Tick::Running(self.value)
        }
    }
}

/// Whole-second betting window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advance one second. Returns `true` on the tick that expires it.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            0 => false,
            1 => {
                self.remaining = 0;
                true
            }
            _ => {
                self.remaining -= 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_reaches_threshold() {
        let mut acc = Accumulator::new(1.0, 0.5, 2.0);
        assert_eq!(acc.tick(), Tick::Running(1.5));
        assert_eq!(acc.tick(), Tick::Reached(2.0));
        assert!(acc.is_done());
        assert_eq!(acc.tick(), Tick::Idle);
        assert_eq!(acc.value(), 2.0);
    }

    #[test]
    fn test_countdown() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 1);
        assert!(countdown.tick());
        assert!(countdown.is_expired());
        assert!(!countdown.tick());
    }

    #[test]
    fn test_zero_countdown_never_fires() {
        let mut countdown = Countdown::new(0);
        assert!(countdown.is_expired());
        assert!(!countdown.tick());
    }
}
