//! Error types for rd-output.

use thiserror::Error;

/// Errors that can occur when persisting a snapshot.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("host buffer not in sync at t={time}: holds {got} densities, expected {expected}")]
    StaleState {
        time:     f64,
        expected: usize,
        got:      usize,
    },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
