//! Native column values as held by a row cursor.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::column_type::NativeKind;

/// Native value of one column in the current row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Stored null (the absence marker)
    Null,
    Bool(bool),
    /// TINYINT and SMALLINT
    I16(i16),
    /// INTEGER
    I32(i32),
    /// BIGINT
    I64(i64),
    /// REAL
    F32(f32),
    /// FLOAT and DOUBLE
    F64(f64),
    /// NUMERIC and DECIMAL, scale preserved
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Character family
    Text(String),
}

impl SqlValue {
    /// Check if this value is the null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Native kind of this value, `None` for null.
    #[must_use]
    pub fn kind(&self) -> Option<NativeKind> {
        let kind = match self {
            SqlValue::Null => return None,
            SqlValue::Bool(_) => NativeKind::Bool,
            SqlValue::I16(_) => NativeKind::I16,
            SqlValue::I32(_) => NativeKind::I32,
            SqlValue::I64(_) => NativeKind::I64,
            SqlValue::F32(_) => NativeKind::F32,
            SqlValue::F64(_) => NativeKind::F64,
            SqlValue::Decimal(_) => NativeKind::Decimal,
            SqlValue::Date(_) => NativeKind::Date,
            SqlValue::Time(_) => NativeKind::Time,
            SqlValue::Timestamp(_) => NativeKind::Timestamp,
            SqlValue::Text(_) => NativeKind::Text,
        };
        Some(kind)
    }

    /// Name of the value's kind, `"null"` for the null marker.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("null", NativeKind::name)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        SqlValue::F32(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}
