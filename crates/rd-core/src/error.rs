//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `RdError` as one variant
//! where they call into `rd-core` validation.

use thiserror::Error;

use crate::SubstrateId;

/// The top-level error type for `rd-core`.
#[derive(Debug, Error)]
pub enum RdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} not found")]
    SubstrateNotFound(SubstrateId),
}

/// Shorthand result type for `rd-core`.
pub type RdResult<T> = Result<T, RdError>;
