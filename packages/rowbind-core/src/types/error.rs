use super::ColumnType;

/// Error type for value encoding and decoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("Column '{column}' has unsupported type {column_type}")]
    UnsupportedColumnType {
        column: String,
        column_type: ColumnType,
    },

    #[error("Column '{column}' ({column_type}): '{text}' is not a valid number")]
    InvalidNumericLiteral {
        column: String,
        column_type: ColumnType,
        text: String,
    },

    #[error("Column '{column}': '{text}' is not a boolean literal")]
    InvalidBooleanLiteral { column: String, text: String },

    #[error("Column '{column}' ({column_type}): '{text}' is not a valid value")]
    InvalidTemporalLiteral {
        column: String,
        column_type: ColumnType,
        text: String,
    },

    #[error("Column '{column}' does not allow null")]
    NullNotAllowed { column: String },

    #[error("Column '{column}' ({column_type}) cannot hold a {got} value")]
    ValueTypeMismatch {
        column: String,
        column_type: ColumnType,
        got: &'static str,
    },

    #[error("Column '{column}' ({column_type}): {value} has no text form")]
    ValueOutOfRange {
        column: String,
        column_type: ColumnType,
        value: String,
    },

    #[error("Unknown SQL type name '{name}'")]
    UnknownTypeName { name: String },

    #[error("Codec for {column_type} already registered")]
    AlreadyRegistered { column_type: ColumnType },
}
