//! `rd-sim` — time-stepping driver for the `rd` reaction–diffusion framework.
//!
//! # Run loop
//!
//! ```text
//! solver.initialize(env)                      (once)
//! writer.write_snapshot(0, env)               (unconditional)
//! while t < simulation_time - ε:
//!   ① t += diffusion_timestep
//!   ② transfer_to_device → step → transfer_to_host     (timed: compute)
//!   ③ if cadence due:
//!        writer.write_snapshot(t, env)                  (timed: snapshot)
//!        report { t, compute, snapshot }; compute = 0
//! if the last step was not a boundary: closing snapshot (no report)
//! writer.finish()
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Enables `rd-solver/parallel` (Rayon axis sweeps).      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rd_env::Environment;
//! use rd_output::CsvSnapshotWriter;
//! use rd_sim::{ConsoleReporter, SimBuilder};
//! use rd_solver::build_solver;
//!
//! let env = Environment::from_config_path(path)?;
//! let solver = build_solver(&env.solver);
//! let writer = CsvSnapshotWriter::new(&env.output.directory)?;
//! let mut sim = SimBuilder::new(env, solver, writer).build()?;
//! sim.run(&mut ConsoleReporter::new(std::io::stdout()))?;
//! ```

pub mod builder;
pub mod console;
pub mod error;
pub mod observer;
pub mod sim;
pub mod timing;


pub use builder::SimBuilder;
pub use console::{ConsoleReporter, DEFAULT_PREFIX, format_value};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim};
pub use timing::{ProgressReport, TimingAccumulator};
