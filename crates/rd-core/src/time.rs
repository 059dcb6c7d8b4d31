//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is a continuous `f64` advanced by a fixed diffusion
//! timestep.  Repeated addition accumulates rounding error, so every
//! comparison against a time boundary is made with a fixed tolerance
//! [`TIME_EPSILON`]:
//!
//! ```text
//! finished  ⇔  current_time >= simulation_time - ε
//! due       ⇔  current_time + ε >= next_output_time
//! ```
//!
//! The clock also counts iterations so callers can check the exact number of
//! steps taken without re-deriving it from floating-point time.

use std::fmt;

use crate::{RdError, RdResult};

/// Tolerance applied to every time-boundary comparison.
pub const TIME_EPSILON: f64 = 1e-12;

// ── TimeConfig ────────────────────────────────────────────────────────────────

/// The three time parameters of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeConfig {
    /// Total simulated duration.
    pub simulation_time: f64,
    /// Fixed simulated-time increment per loop iteration.
    pub diffusion_timestep: f64,
    /// Simulated time between snapshots / progress reports.
    pub output_interval: f64,
}

impl TimeConfig {
    /// Check that every parameter is finite and positive and that the
    /// timestep does not exceed the total duration.
    pub fn validate(&self) -> RdResult<()> {
        check_positive("simulation_time", self.simulation_time)?;
        check_positive("diffusion_timestep", self.diffusion_timestep)?;
        check_positive("output_interval", self.output_interval)?;
        if self.diffusion_timestep > self.simulation_time {
            return Err(RdError::Config(format!(
                "diffusion_timestep ({}) exceeds simulation_time ({})",
                self.diffusion_timestep, self.simulation_time
            )));
        }
        Ok(())
    }

    /// A clock starting at time zero that steps by `diffusion_timestep`.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.diffusion_timestep)
    }

    /// An output schedule whose first boundary is at `output_interval`.
    pub fn make_schedule(&self) -> OutputSchedule {
        OutputSchedule::new(self.output_interval)
    }
}

fn check_positive(what: &str, value: f64) -> RdResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RdError::Config(format!("{what} must be a positive finite number, got {value}")))
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks current simulated time and the number of steps taken.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Current simulated time.  Starts at 0 and never decreases.
    pub current_time: f64,
    /// Increment applied by every [`advance`](Self::advance).
    pub timestep: f64,
    /// Number of `advance` calls so far.
    pub iterations: u64,
}

impl SimClock {
    pub fn new(timestep: f64) -> Self {
        Self {
            current_time: 0.0,
            timestep,
            iterations: 0,
        }
    }

    /// Advance the clock by one timestep and return the new time.
    #[inline]
    pub fn advance(&mut self) -> f64 {
        self.current_time += self.timestep;
        self.iterations += 1;
        self.current_time
    }

    /// `true` once `current_time` has reached `end_time` within
    /// [`TIME_EPSILON`].
    #[inline]
    pub fn is_finished(&self, end_time: f64) -> bool {
        self.current_time >= end_time - TIME_EPSILON
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} (step {})", self.current_time, self.iterations)
    }
}

// ── OutputSchedule ────────────────────────────────────────────────────────────

/// Fixed-interval output cadence.
///
/// Each due check that fires advances the next boundary by exactly one
/// interval, even when a single step crossed several boundaries.  A run whose
/// timestep is larger than the interval therefore reports once per step and
/// lets `next_output_time` lag behind `current_time`.
#[derive(Clone, Debug)]
pub struct OutputSchedule {
    pub interval: f64,
    pub next_output_time: f64,
}

impl OutputSchedule {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_output_time: interval,
        }
    }

    /// Is an output due at `current_time`?
    #[inline]
    pub fn is_due(&self, current_time: f64) -> bool {
        current_time + TIME_EPSILON >= self.next_output_time
    }

    /// Move the next boundary forward by one interval.
    #[inline]
    pub fn advance(&mut self) {
        self.next_output_time += self.interval;
    }

    /// Check and, if due, advance.  Returns whether output is due.
    pub fn poll(&mut self, current_time: f64) -> bool {
        if self.is_due(current_time) {
            self.advance();
            true
        } else {
            false
        }
    }
}
