use rd_core::{SubstrateId, VoxelId};
use thiserror::Error;

use crate::{Operation, SolverPhase};

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver protocol violation: {op} called in phase {phase}")]
    Protocol {
        op:    Operation,
        phase: SolverPhase,
    },

    #[error("{what} holds {got} densities, solver expects {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("non-finite density {value} for {substrate} at {voxel} (t={time})")]
    NonFinite {
        voxel:     VoxelId,
        substrate: SubstrateId,
        value:     f64,
        time:      f64,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
