use std::path::PathBuf;

use rd_core::RdError;
use thiserror::Error;

/// Failure to construct an [`Environment`][crate::Environment] from a
/// configuration source.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path:?}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] RdError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
