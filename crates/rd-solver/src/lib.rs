//! `rd-solver` — the solver side of the `rd` driver.
//!
//! # Handoff protocol
//!
//! ```text
//! initialize                      (once)
//! for each timestep:
//!   ① transfer_to_device  — host buffer → solver memory
//!   ② step                — one implicit update, solver memory only
//!   ③ transfer_to_host    — solver memory → host buffer
//! ```
//!
//! [`ProtocolGuard`] enforces the order; any other sequence returns
//! [`SolverError::Protocol`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Solves the lines of each axis sweep on Rayon's pool.    |

pub mod device;
pub mod diffusion;
pub mod error;
pub mod lod;
pub mod protocol;
pub mod solver;


pub use device::DeviceBuffer;
pub use diffusion::{LodSolver, build_solver};
pub use error::{SolverError, SolverResult};
pub use protocol::{Operation, ProtocolGuard, SolverPhase};
pub use solver::Solver;
