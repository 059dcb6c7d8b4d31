use rd_output::OutputError;
use rd_solver::{SolverError, SolverPhase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("solver failure")]
    Solver(#[from] SolverError),

    #[error("serialization failure")]
    Output(#[from] OutputError),

    #[error("snapshot at t={time} requested while solver is in phase {phase}")]
    HostNotSynced {
        time:  f64,
        phase: SolverPhase,
    },
}

pub type SimResult<T> = Result<T, SimError>;
