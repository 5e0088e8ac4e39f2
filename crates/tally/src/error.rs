//! Error types for the session facade.

use tally_model::ModelError;
use tally_trace::TraceError;
use tally_types::{Column, Operation, ParseError};

/// Result type for session operations.
pub type Result<T, E = SessionError> = std::result::Result<T, E>;

/// Errors returned by [`crate::Session`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{0}' is not a whole number")]
    InvalidOperand(String),

    #[error(transparent)]
    UnknownOperation(#[from] ParseError),

    #[error("no column algorithm for '{0}'")]
    UnsupportedOperation(Operation),

    #[error("{a} - {b} would go below zero")]
    MinuendTooSmall { a: u32, b: u32 },

    #[error("column {column} is outside a {width}-column grid")]
    ColumnOutOfRange { column: Column, width: usize },

    #[error("{0} is not a single digit")]
    InvalidDigit(u8),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
