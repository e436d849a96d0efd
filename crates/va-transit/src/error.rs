//! Transit-subsystem error type.

use thiserror::Error;

use va_core::CoreError;

/// Errors produced by `va-transit`.
#[derive(Debug, Error)]
pub enum TransitError {
    #[error("stop {0} not found in schedule")]
    UnknownStop(String),

    #[error("line {0} not found in schedule")]
    UnknownLine(String),

    #[error("invalid route {route}: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TransitResult<T> = Result<T, TransitError>;
