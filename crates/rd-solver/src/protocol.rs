//! Handoff protocol state machine.
//!
//! ```text
//! Uninitialized ──initialize──▶ Initialized
//!                                   │
//!                     transfer_to_device
//!                                   ▼
//!   HostSynced ──transfer_to_device──▶ DeviceSynced ──step──▶ Stepped
//!        ▲                                                     │
//!        └───────────────────transfer_to_host──────────────────┘
//! ```
//!
//! Host-visible state is only valid in `Initialized` and `HostSynced`.

use std::fmt;

use crate::{SolverError, SolverResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolverPhase {
    Uninitialized,
    Initialized,
    DeviceSynced,
    Stepped,
    HostSynced,
}

impl SolverPhase {
    /// `true` when the environment's host buffer reflects the latest state.
    pub fn host_is_current(self) -> bool {
        matches!(self, SolverPhase::Initialized | SolverPhase::HostSynced)
    }
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One call of the [`Solver`][crate::Solver] protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    TransferToDevice,
    Step,
    TransferToHost,
}

impl Operation {
    /// Whether this operation may be called in `phase`.
    pub fn accepts(self, phase: SolverPhase) -> bool {
        use SolverPhase::*;
        match self {
            Operation::Initialize       => phase == Uninitialized,
            Operation::TransferToDevice => matches!(phase, Initialized | HostSynced),
            Operation::Step             => phase == DeviceSynced,
            Operation::TransferToHost   => phase == Stepped,
        }
    }

    /// The phase the solver is in after this operation succeeds.
    pub fn target(self) -> SolverPhase {
        match self {
            Operation::Initialize       => SolverPhase::Initialized,
            Operation::TransferToDevice => SolverPhase::DeviceSynced,
            Operation::Step             => SolverPhase::Stepped,
            Operation::TransferToHost   => SolverPhase::HostSynced,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Initialize       => "initialize",
            Operation::TransferToDevice => "transfer_to_device",
            Operation::Step             => "step",
            Operation::TransferToHost   => "transfer_to_host",
        })
    }
}

/// Tracks the current protocol phase and rejects out-of-order calls.
///
/// Solvers call [`check`](Self::check) before doing any work and
/// [`commit`](Self::commit) once the work succeeded, so a failed operation
/// leaves the phase unchanged.
#[derive(Clone, Debug)]
pub struct ProtocolGuard {
    phase: SolverPhase,
}

impl Default for ProtocolGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolGuard {
    pub fn new() -> Self {
        Self { phase: SolverPhase::Uninitialized }
    }

    #[inline]
    pub fn phase(&self) -> SolverPhase {
        self.phase
    }

    pub fn check(&self, op: Operation) -> SolverResult<()> {
        if op.accepts(self.phase) {
            Ok(())
        } else {
            Err(SolverError::Protocol { op, phase: self.phase })
        }
    }

    #[inline]
    pub fn commit(&mut self, op: Operation) {
        debug_assert!(op.accepts(self.phase));
        self.phase = op.target();
    }
}
