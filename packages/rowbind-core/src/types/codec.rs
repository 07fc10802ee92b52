use std::fmt;

use crate::config::BooleanPolicy;

use super::column_type::ColumnType;
use super::error::CodecError;
use super::value::SqlValue;

/// Encoder signature: native non-null value to display text.
pub type EncodeFn = fn(&SqlValue, &CodecContext<'_>) -> Result<String, CodecError>;

/// Decoder signature: non-empty text to a native value.
pub type DecodeFn = fn(&str, &CodecContext<'_>) -> Result<Decoded, CodecError>;

/// Column information handed to encoders and decoders.
#[derive(Debug, Clone, Copy)]
pub struct CodecContext<'a> {
    /// Column name, used in error messages
    pub column: &'a str,
    /// Declared type of the column
    pub column_type: ColumnType,
    /// How unrecognized boolean text is treated
    pub boolean_policy: BooleanPolicy,
}

/// Result of decoding a text buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Value to write, possibly [`SqlValue::Null`]
    Value(SqlValue),
    /// Partially typed date, time or timestamp; nothing is written
    Incomplete,
}

/// Encode/decode strategy pair for one column family.
#[derive(Clone, Copy)]
pub struct ColumnCodec {
    /// Native value to text
    pub encode: EncodeFn,
    /// Text to native value
    pub decode: DecodeFn,
}

impl ColumnCodec {
    /// Creates a codec from an encoder and decoder.
    pub fn new(encode: EncodeFn, decode: DecodeFn) -> Self {
        Self { encode, decode }
    }
}

impl fmt::Debug for ColumnCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnCodec").finish_non_exhaustive()
    }
}
