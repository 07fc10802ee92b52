//! Column types, native values, and the text codecs between them.

mod builtin_codecs;
mod codec;
mod codec_registry;
mod column_type;
mod error;
mod value;

pub use builtin_codecs::{
    format_timestamp, register_builtin_codecs, DATE_FORMAT, DATE_TEXT_LEN, SUPPORTED_TYPES,
    TIMESTAMP_TEXT_MIN_LEN, TIME_FORMAT, TIME_TEXT_LEN,
};
pub use codec::{CodecContext, ColumnCodec, DecodeFn, Decoded, EncodeFn};
pub use codec_registry::CodecRegistry;
pub use column_type::{ColumnType, NativeKind, TypeFamily};
pub use error::CodecError;
pub use value::SqlValue;
