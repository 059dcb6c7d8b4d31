//! The `Solver` trait: the capability set the driver depends on.

use rd_env::Environment;

use crate::{SolverPhase, SolverResult};

/// A stateful engine that advances an [`Environment`] one timestep at a time.
///
/// The driver calls the four operations in protocol order (see
/// [`protocol`][crate::protocol]):
///
/// ```text
/// initialize
/// loop {
///     transfer_to_device
///     step
///     transfer_to_host
/// }
/// ```
///
/// `transfer_to_device` and `transfer_to_host` are always called, even when a
/// solver computes directly on host memory.  [`step`](Self::step) receives no
/// environment: it may only touch memory the solver owns, so the host buffer
/// can never be observed half-updated.
///
/// # Example
///
/// ```rust,ignore
/// let mut solver = build_solver(&env.solver);
/// solver.initialize(&env)?;
/// solver.transfer_to_device(&mut env)?;
/// solver.step()?;
/// solver.transfer_to_host(&mut env)?;
/// ```
pub trait Solver {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Current protocol phase.
    fn phase(&self) -> SolverPhase;

    /// One-time setup: bind to `env`'s mesh, substrates, and timestep.
    fn initialize(&mut self, env: &Environment) -> SolverResult<()>;

    /// Publish the host-visible state into the solver's memory.
    fn transfer_to_device(&mut self, env: &mut Environment) -> SolverResult<()>;

    /// Advance the solver-held state by one diffusion timestep.
    fn step(&mut self) -> SolverResult<()>;

    /// Copy the solver-held state back into the host-visible buffer.
    fn transfer_to_host(&mut self, env: &mut Environment) -> SolverResult<()>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn phase(&self) -> SolverPhase {
        (**self).phase()
    }

    fn initialize(&mut self, env: &Environment) -> SolverResult<()> {
        (**self).initialize(env)
    }

    fn transfer_to_device(&mut self, env: &mut Environment) -> SolverResult<()> {
        (**self).transfer_to_device(env)
    }

    fn step(&mut self) -> SolverResult<()> {
        (**self).step()
    }

    fn transfer_to_host(&mut self, env: &mut Environment) -> SolverResult<()> {
        (**self).transfer_to_host(env)
    }
}
