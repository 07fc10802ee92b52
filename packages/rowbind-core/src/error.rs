//! Binding error types.

use thiserror::Error;

use crate::types::CodecError;

/// Errors crossing the binding boundary.
///
/// Codec failures are wrapped as [`BindError::Codec`]; every other variant
/// describes a failure of the row cursor or text buffer contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// Value conversion failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// No column with the given name
    #[error("Column '{name}' not found")]
    ColumnNotFound { name: String },

    /// Column index beyond the cursor's column count
    #[error("Column index {index} out of range (column count: {count})")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    /// Operation needs a bound cursor column
    #[error("Field is not bound to a cursor column")]
    NotBound,

    /// Cursor is positioned before the first or after the last row
    #[error("Cursor has no current row")]
    NoCurrentRow,

    /// Native value does not match the column's declared type
    #[error("Column '{column}' expects {expected}, got {got}")]
    ValueTypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    /// Null written to a column declared NOT NULL
    #[error("Column '{column}' does not accept null")]
    NullConstraint { column: String },

    /// Row value count differs from the column count
    #[error("Row has {got} values, expected {expected}")]
    RowArityMismatch { expected: usize, got: usize },

    /// Text offset beyond the end of a buffer
    #[error("Offset {offset} out of range for buffer of length {len}")]
    InvalidBufferOffset { offset: usize, len: usize },

    /// Failure reported by an external data source
    #[error("Data access failure: {0}")]
    DataAccess(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
