//! The `Sim` struct and its time-stepping loop.

use std::time::Instant;

use rd_core::{OutputSchedule, SimClock};
use rd_env::Environment;
use rd_output::SnapshotWriter;
use rd_solver::Solver;

use crate::{SimError, SimObserver, SimResult, TimingAccumulator};

/// What a completed run did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Loop iterations (solver steps) performed.
    pub iterations: u64,
    /// Snapshots written, including the initial one.
    pub snapshots:  u64,
    /// Simulated time after the last step.
    pub final_time: f64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The time-stepping driver.
///
/// `Sim<S, W>` owns the environment for the whole run and drives:
///
/// 1. **Clock**: advance `current_time` by one diffusion timestep.
/// 2. **Handoff** (timed as compute): `transfer_to_device`, `step`,
///    `transfer_to_host`, always in that order.
/// 3. **Cadence**: when the [`OutputSchedule`] is due, write a snapshot
///    (timed as snapshot), emit a [`ProgressReport`][crate::ProgressReport],
///    and reset the compute counter.
///
/// Solver and serializer failures are not recovered: they abort the loop and
/// are returned from [`run`](Self::run).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: Solver, W: SnapshotWriter> {
    /// Configuration and host-visible state.
    pub env:      Environment,

    /// The solver bound to `env` at the start of [`run`](Self::run).
    pub solver:   S,

    /// Snapshot serializer.
    pub writer:   W,

    /// Simulated time and iteration count.
    pub clock:    SimClock,

    /// Output cadence.
    pub schedule: OutputSchedule,

    /// Compute / snapshot wall-clock counters.
    pub timing:   TimingAccumulator,

    /// Write a closing snapshot when the last step is not a cadence boundary.
    pub(crate) final_snapshot: bool,

    snapshots: u64,
}

impl<S: Solver, W: SnapshotWriter> Sim<S, W> {
    pub(crate) fn new(env: Environment, solver: S, writer: W, final_snapshot: bool) -> Self {
        Self {
            clock:    env.time.make_clock(),
            schedule: env.time.make_schedule(),
            timing:   TimingAccumulator::new(),
            env,
            solver,
            writer,
            final_snapshot,
            snapshots: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from time zero to `simulation_time`.
    ///
    /// Initializes the solver (so a `Sim` can only run once), writes the
    /// initial snapshot, then steps until the clock is finished.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        self.solver.initialize(&self.env)?;
        self.write_snapshot(self.clock.current_time, observer)?;
        observer.on_run_start(&self.env);

        let end_time = self.env.simulation_time();
        let mut reported_last_step = false;

        while !self.clock.is_finished(end_time) {
            let now = self.clock.advance();

            let start = Instant::now();
            self.solver.transfer_to_device(&mut self.env)?;
            self.solver.step()?;
            self.solver.transfer_to_host(&mut self.env)?;
            self.timing.record_compute(start.elapsed());

            reported_last_step = self.schedule.poll(now);
            if reported_last_step {
                self.report(now, observer)?;
            }
        }

        // Not a cadence boundary, so no progress report.
        if self.final_snapshot && !reported_last_step {
            self.timed_snapshot(self.clock.current_time, observer)?;
        }

        self.writer.finish()?;

        let summary = RunSummary {
            iterations: self.clock.iterations,
            snapshots:  self.snapshots,
            final_time: self.clock.current_time,
        };
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Snapshots written so far.
    pub fn snapshot_count(&self) -> u64 {
        self.snapshots
    }

    // ── Loop helpers ──────────────────────────────────────────────────────

    /// Timed snapshot followed by a progress report.
    fn report<O: SimObserver>(&mut self, now: f64, observer: &mut O) -> SimResult<()> {
        self.timed_snapshot(now, observer)?;
        let report = self.timing.take_report(now);
        observer.on_report(&report);
        Ok(())
    }

    fn timed_snapshot<O: SimObserver>(&mut self, now: f64, observer: &mut O) -> SimResult<()> {
        let start = Instant::now();
        self.write_snapshot(now, observer)?;
        self.timing.record_snapshot(start.elapsed());
        Ok(())
    }

    fn write_snapshot<O: SimObserver>(&mut self, time: f64, observer: &mut O) -> SimResult<()> {
        // The host buffer is only meaningful outside the device window.
        let phase = self.solver.phase();
        if !phase.host_is_current() {
            return Err(SimError::HostNotSynced { time, phase });
        }
        self.writer.write_snapshot(time, &self.env)?;
        observer.on_snapshot(time, self.snapshots);
        self.snapshots += 1;
        Ok(())
    }
}
