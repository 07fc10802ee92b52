use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::config::BooleanPolicy;

use super::codec::{CodecContext, ColumnCodec, Decoded};
use super::codec_registry::CodecRegistry;
use super::column_type::{ColumnType, TypeFamily};
use super::error::CodecError;
use super::value::SqlValue;

/// Display format for DATE columns.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Alternate DATE input format.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for TIME columns.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Length of a complete date string.
pub const DATE_TEXT_LEN: usize = 10;

/// Length of a complete time string.
pub const TIME_TEXT_LEN: usize = 8;

/// Minimum length of a complete timestamp string.
pub const TIMESTAMP_TEXT_MIN_LEN: usize = 19;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn mismatch(value: &SqlValue, ctx: &CodecContext<'_>) -> CodecError {
    CodecError::ValueTypeMismatch {
        column: ctx.column.to_string(),
        column_type: ctx.column_type,
        got: value.kind_name(),
    }
}

fn invalid_number(text: &str, ctx: &CodecContext<'_>) -> CodecError {
    CodecError::InvalidNumericLiteral {
        column: ctx.column.to_string(),
        column_type: ctx.column_type,
        text: text.to_string(),
    }
}

fn invalid_temporal(text: &str, ctx: &CodecContext<'_>) -> CodecError {
    CodecError::InvalidTemporalLiteral {
        column: ctx.column.to_string(),
        column_type: ctx.column_type,
        text: text.to_string(),
    }
}

/// Years `%Y` prints as exactly four digits.
fn check_year(date: NaiveDate, value: &SqlValue, ctx: &CodecContext<'_>) -> Result<(), CodecError> {
    if (0..=9999).contains(&date.year()) {
        return Ok(());
    }
    Err(CodecError::ValueOutOfRange {
        column: ctx.column.to_string(),
        column_type: ctx.column_type,
        value: format!("{:?}", value),
    })
}

fn encode_integral(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::I16(v) => Ok(v.to_string()),
        SqlValue::I32(v) => Ok(v.to_string()),
        SqlValue::I64(v) => Ok(v.to_string()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_integral(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    let value = match ctx.column_type {
        ColumnType::TinyInt | ColumnType::SmallInt => text.parse::<i16>().map(SqlValue::I16),
        ColumnType::Integer => text.parse::<i32>().map(SqlValue::I32),
        _ => text.parse::<i64>().map(SqlValue::I64),
    };
    value
        .map(Decoded::Value)
        .map_err(|_| invalid_number(text, ctx))
}

// Display for floats is the shortest string that parses back to the same bits
// and never uses grouping or exponents.
fn encode_floating(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::F32(v) => Ok(v.to_string()),
        SqlValue::F64(v) => Ok(v.to_string()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_floating(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    let value = match ctx.column_type {
        ColumnType::Real => text.parse::<f32>().map(SqlValue::F32),
        _ => text.parse::<f64>().map(SqlValue::F64),
    };
    value
        .map(Decoded::Value)
        .map_err(|_| invalid_number(text, ctx))
}

fn encode_fixed(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Decimal(v) => Ok(v.to_string()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_fixed(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(|v| Decoded::Value(SqlValue::Decimal(v)))
        .map_err(|_| invalid_number(text, ctx))
}

fn encode_boolean(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Bool(v) => Ok(v.to_string()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_boolean(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    if text.eq_ignore_ascii_case("true") {
        return Ok(Decoded::Value(SqlValue::Bool(true)));
    }
    match ctx.boolean_policy {
        BooleanPolicy::Lenient => Ok(Decoded::Value(SqlValue::Bool(false))),
        BooleanPolicy::Strict if text.eq_ignore_ascii_case("false") => {
            Ok(Decoded::Value(SqlValue::Bool(false)))
        }
        BooleanPolicy::Strict => Err(CodecError::InvalidBooleanLiteral {
            column: ctx.column.to_string(),
            text: text.to_string(),
        }),
    }
}

fn encode_date(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Date(v) => {
            check_year(*v, value, ctx)?;
            Ok(v.format(DATE_FORMAT).to_string())
        }
        other => Err(mismatch(other, ctx)),
    }
}

/// Parses a complete 10-character date, `MM/DD/YYYY` or `YYYY-MM-DD`.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, ISO_DATE_FORMAT))
        .ok()
}

fn decode_date(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    if text.chars().count() != DATE_TEXT_LEN {
        return Ok(Decoded::Incomplete);
    }
    parse_date(text)
        .map(|d| Decoded::Value(SqlValue::Date(d)))
        .ok_or_else(|| invalid_temporal(text, ctx))
}

fn encode_time(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Time(v) => Ok(v.format(TIME_FORMAT).to_string()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_time(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    if text.chars().count() != TIME_TEXT_LEN {
        return Ok(Decoded::Incomplete);
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map(|t| Decoded::Value(SqlValue::Time(t)))
        .map_err(|_| invalid_temporal(text, ctx))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS.f`, keeping at least one
/// fractional digit and dropping trailing zeros.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    let nanos = ts.nanosecond() % 1_000_000_000;
    let digits = format!("{nanos:09}");
    let trimmed = digits.trim_end_matches('0');
    let fraction = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{}.{}", ts.format("%Y-%m-%d %H:%M:%S"), fraction)
}

fn encode_timestamp(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Timestamp(v) => {
            check_year(v.date(), value, ctx)?;
            Ok(format_timestamp(v))
        }
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_timestamp(text: &str, ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    let len = text.chars().count();
    if len == DATE_TEXT_LEN {
        return parse_date(text)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ts| Decoded::Value(SqlValue::Timestamp(ts)))
            .ok_or_else(|| invalid_temporal(text, ctx));
    }
    if len < TIMESTAMP_TEXT_MIN_LEN {
        return Ok(Decoded::Incomplete);
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|ts| Decoded::Value(SqlValue::Timestamp(ts)))
        .ok_or_else(|| invalid_temporal(text, ctx))
}

fn encode_character(value: &SqlValue, ctx: &CodecContext<'_>) -> Result<String, CodecError> {
    match value {
        SqlValue::Text(v) => Ok(v.clone()),
        other => Err(mismatch(other, ctx)),
    }
}

fn decode_character(text: &str, _ctx: &CodecContext<'_>) -> Result<Decoded, CodecError> {
    Ok(Decoded::Value(SqlValue::Text(text.to_string())))
}

/// Returns the built-in codec for a family, `None` for unsupported types.
pub fn codec_for_family(family: TypeFamily) -> Option<ColumnCodec> {
    let codec = match family {
        TypeFamily::Integral => ColumnCodec::new(encode_integral, decode_integral),
        TypeFamily::Floating => ColumnCodec::new(encode_floating, decode_floating),
        TypeFamily::Fixed => ColumnCodec::new(encode_fixed, decode_fixed),
        TypeFamily::Boolean => ColumnCodec::new(encode_boolean, decode_boolean),
        TypeFamily::Date => ColumnCodec::new(encode_date, decode_date),
        TypeFamily::Time => ColumnCodec::new(encode_time, decode_time),
        TypeFamily::Timestamp => ColumnCodec::new(encode_timestamp, decode_timestamp),
        TypeFamily::Character => ColumnCodec::new(encode_character, decode_character),
        TypeFamily::Unsupported => return None,
    };
    Some(codec)
}

/// Every column type that has a built-in codec.
pub const SUPPORTED_TYPES: [ColumnType; 20] = [
    ColumnType::TinyInt,
    ColumnType::SmallInt,
    ColumnType::Integer,
    ColumnType::BigInt,
    ColumnType::Real,
    ColumnType::Float,
    ColumnType::Double,
    ColumnType::Numeric,
    ColumnType::Decimal,
    ColumnType::Bit,
    ColumnType::Boolean,
    ColumnType::Date,
    ColumnType::Time,
    ColumnType::Timestamp,
    ColumnType::Char,
    ColumnType::VarChar,
    ColumnType::LongVarChar,
    ColumnType::NChar,
    ColumnType::NVarChar,
    ColumnType::LongNVarChar,
];

/// Registers all built-in codecs in the registry.
///
/// # Returns
/// `Ok(())` if all codecs registered, `Err(CodecError::AlreadyRegistered)`
/// if the registry already holds one of the supported types.
pub fn register_builtin_codecs(registry: &mut CodecRegistry) -> Result<(), CodecError> {
    for column_type in SUPPORTED_TYPES {
        if let Some(codec) = codec_for_family(column_type.family()) {
            registry.register(column_type, codec)?;
        }
    }
    Ok(())
}
