//! Fluent builder for constructing a [`Sim`].

use rd_env::Environment;
use rd_output::SnapshotWriter;
use rd_solver::{Solver, SolverPhase};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S, W>`].
///
/// # Required inputs
///
/// - [`Environment`]: time parameters, mesh, substrates, densities
/// - `S: Solver`: usually [`rd_solver::build_solver`]`(&env.solver)`
/// - `W: SnapshotWriter`: e.g. [`rd_output::CsvSnapshotWriter`]
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.output_interval(x)`   | `env.time.output_interval`       |
/// | `.final_snapshot(b)`    | `true`                           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(env, build_solver(&settings), NoopWriter)
///     .output_interval(50.0)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: Solver, W: SnapshotWriter> {
    env:             Environment,
    solver:          S,
    writer:          W,
    output_interval: Option<f64>,
    final_snapshot:  bool,
}

impl<S: Solver, W: SnapshotWriter> SimBuilder<S, W> {
    /// Create a builder with all required inputs.
    pub fn new(env: Environment, solver: S, writer: W) -> Self {
        Self {
            env,
            solver,
            writer,
            output_interval: None,
            final_snapshot:  true,
        }
    }

    /// Override the environment's output interval.
    pub fn output_interval(mut self, interval: f64) -> Self {
        self.output_interval = Some(interval);
        self
    }

    /// Whether to write a closing snapshot at `simulation_time` when the last
    /// step does not land on a cadence boundary.
    ///
    /// With `false` the only snapshots are the initial one and those the
    /// cadence produces.
    pub fn final_snapshot(mut self, enabled: bool) -> Self {
        self.final_snapshot = enabled;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<S, W>> {
        if let Some(interval) = self.output_interval {
            self.env.time.output_interval = interval;
        }
        self.env
            .time
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        if !self.env.densities.is_resident() {
            return Err(SimError::Config(
                "environment density buffer is not resident on the host".to_owned(),
            ));
        }
        if self.solver.phase() != SolverPhase::Uninitialized {
            return Err(SimError::Config(format!(
                "solver {} is already in phase {}",
                self.solver.name(),
                self.solver.phase()
            )));
        }

        Ok(Sim::new(self.env, self.solver, self.writer, self.final_snapshot))
    }
}
