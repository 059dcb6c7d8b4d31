//! Simulation observer trait for progress reporting.

use rd_env::Environment;

use crate::{ProgressReport, RunSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points of the
/// loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: snapshot counter
///
/// ```rust,ignore
/// struct SnapshotCounter(usize);
///
/// impl SimObserver for SnapshotCounter {
///     fn on_snapshot(&mut self, _time: f64, _index: u64) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once after the solver is initialized and the initial snapshot
    /// is written, before the first step.
    fn on_run_start(&mut self, _env: &Environment) {}

    /// Called after every snapshot, including the initial one.  `index`
    /// counts snapshots from zero.
    fn on_snapshot(&mut self, _time: f64, _index: u64) {}

    /// Called once per cadence boundary with the timing report.
    fn on_report(&mut self, _report: &ProgressReport) {}

    /// Called once after the loop completes successfully.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
