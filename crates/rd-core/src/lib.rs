//! `rd-core` — foundational types for the `rd` reaction–diffusion driver.
//!
//! This crate is a dependency of every other `rd-*` crate.  It has no `rd-*`
//! dependencies and only `thiserror` externally (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `SubstrateId`, `VoxelId` dense indices                    |
//! | [`time`]   | `SimClock`, `OutputSchedule`, `TimeConfig`, `TIME_EPSILON` |
//! | [`error`]  | `RdError`, `RdResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `TimeConfig`.    |

pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RdError, RdResult};
pub use ids::{SubstrateId, VoxelId};
pub use time::{OutputSchedule, SimClock, TIME_EPSILON, TimeConfig};
