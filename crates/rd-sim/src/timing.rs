//! Wall-clock accounting for compute and snapshot work.
//!
//! The two counters are not symmetric.  `compute_runtime` accumulates every
//! step since the last report and is cleared by
//! [`TimingAccumulator::take_report`]; `snapshot_runtime` holds the duration
//! of the most recent snapshot only and is never cleared.

use std::time::Duration;

/// One progress line: simulated time plus the two runtimes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressReport {
    /// Simulated time the report was emitted at.
    pub time:             f64,
    /// Compute time accumulated since the previous report.
    pub compute_runtime:  Duration,
    /// Duration of the most recent snapshot.
    pub snapshot_runtime: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct TimingAccumulator {
    compute_runtime:  Duration,
    snapshot_runtime: Duration,
}

impl TimingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one step's compute duration.
    #[inline]
    pub fn record_compute(&mut self, elapsed: Duration) {
        self.compute_runtime += elapsed;
    }

    /// Replace the snapshot duration.
    #[inline]
    pub fn record_snapshot(&mut self, elapsed: Duration) {
        self.snapshot_runtime = elapsed;
    }

    pub fn compute_runtime(&self) -> Duration {
        self.compute_runtime
    }

    pub fn snapshot_runtime(&self) -> Duration {
        self.snapshot_runtime
    }

    /// Build a report at `time` and reset the compute counter.
    pub fn take_report(&mut self, time: f64) -> ProgressReport {
        let report = ProgressReport {
            time,
            compute_runtime:  self.compute_runtime,
            snapshot_runtime: self.snapshot_runtime,
        };
        self.compute_runtime = Duration::ZERO;
        report
    }
}
