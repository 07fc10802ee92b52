//! SQL column type tags and their grouping into codec families.

use std::fmt;
use std::str::FromStr;

use super::error::CodecError;

/// SQL type tag of a column, following the JDBC type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Numeric,
    Decimal,
    Bit,
    Boolean,
    Date,
    Time,
    Timestamp,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    LongNVarChar,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Clob,
    Array,
    /// Any vendor or unmapped type code
    Other(i32),
}

/// Codec family a column type dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Integral,
    Floating,
    Fixed,
    Boolean,
    Date,
    Time,
    Timestamp,
    Character,
    Unsupported,
}

/// Native representation a column type's values are held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Date,
    Time,
    Timestamp,
    Text,
}

impl NativeKind {
    /// Display name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            NativeKind::Bool => "bool",
            NativeKind::I16 => "i16",
            NativeKind::I32 => "i32",
            NativeKind::I64 => "i64",
            NativeKind::F32 => "f32",
            NativeKind::F64 => "f64",
            NativeKind::Decimal => "decimal",
            NativeKind::Date => "date",
            NativeKind::Time => "time",
            NativeKind::Timestamp => "timestamp",
            NativeKind::Text => "text",
        }
    }
}

impl ColumnType {
    /// Maps a `java.sql.Types` code to a column type.
    ///
    /// Codes without a dedicated tag become [`ColumnType::Other`].
    pub fn from_sql_code(code: i32) -> Self {
        match code {
            -6 => ColumnType::TinyInt,
            5 => ColumnType::SmallInt,
            4 => ColumnType::Integer,
            -5 => ColumnType::BigInt,
            7 => ColumnType::Real,
            6 => ColumnType::Float,
            8 => ColumnType::Double,
            2 => ColumnType::Numeric,
            3 => ColumnType::Decimal,
            -7 => ColumnType::Bit,
            16 => ColumnType::Boolean,
            91 => ColumnType::Date,
            92 => ColumnType::Time,
            93 => ColumnType::Timestamp,
            1 => ColumnType::Char,
            12 => ColumnType::VarChar,
            -1 => ColumnType::LongVarChar,
            -15 => ColumnType::NChar,
            -9 => ColumnType::NVarChar,
            -16 => ColumnType::LongNVarChar,
            -2 => ColumnType::Binary,
            -3 => ColumnType::VarBinary,
            -4 => ColumnType::LongVarBinary,
            2004 => ColumnType::Blob,
            2005 => ColumnType::Clob,
            2003 => ColumnType::Array,
            other => ColumnType::Other(other),
        }
    }

    /// Returns the `java.sql.Types` code for this tag.
    pub fn sql_code(self) -> i32 {
        match self {
            ColumnType::TinyInt => -6,
            ColumnType::SmallInt => 5,
            ColumnType::Integer => 4,
            ColumnType::BigInt => -5,
            ColumnType::Real => 7,
            ColumnType::Float => 6,
            ColumnType::Double => 8,
            ColumnType::Numeric => 2,
            ColumnType::Decimal => 3,
            ColumnType::Bit => -7,
            ColumnType::Boolean => 16,
            ColumnType::Date => 91,
            ColumnType::Time => 92,
            ColumnType::Timestamp => 93,
            ColumnType::Char => 1,
            ColumnType::VarChar => 12,
            ColumnType::LongVarChar => -1,
            ColumnType::NChar => -15,
            ColumnType::NVarChar => -9,
            ColumnType::LongNVarChar => -16,
            ColumnType::Binary => -2,
            ColumnType::VarBinary => -3,
            ColumnType::LongVarBinary => -4,
            ColumnType::Blob => 2004,
            ColumnType::Clob => 2005,
            ColumnType::Array => 2003,
            ColumnType::Other(code) => code,
        }
    }

    /// Returns the codec family for this tag.
    pub fn family(self) -> TypeFamily {
        match self {
            ColumnType::TinyInt | ColumnType::SmallInt | ColumnType::Integer | ColumnType::BigInt => {
                TypeFamily::Integral
            }
            ColumnType::Real | ColumnType::Float | ColumnType::Double => TypeFamily::Floating,
            ColumnType::Numeric | ColumnType::Decimal => TypeFamily::Fixed,
            ColumnType::Bit | ColumnType::Boolean => TypeFamily::Boolean,
            ColumnType::Date => TypeFamily::Date,
            ColumnType::Time => TypeFamily::Time,
            ColumnType::Timestamp => TypeFamily::Timestamp,
            ColumnType::Char
            | ColumnType::VarChar
            | ColumnType::LongVarChar
            | ColumnType::NChar
            | ColumnType::NVarChar
            | ColumnType::LongNVarChar => TypeFamily::Character,
            ColumnType::Binary
            | ColumnType::VarBinary
            | ColumnType::LongVarBinary
            | ColumnType::Blob
            | ColumnType::Clob
            | ColumnType::Array
            | ColumnType::Other(_) => TypeFamily::Unsupported,
        }
    }

    /// Returns the native representation values of this type are stored in,
    /// or `None` for tags without a codec.
    pub fn native_kind(self) -> Option<NativeKind> {
        let kind = match self {
            ColumnType::TinyInt | ColumnType::SmallInt => NativeKind::I16,
            ColumnType::Integer => NativeKind::I32,
            ColumnType::BigInt => NativeKind::I64,
            ColumnType::Real => NativeKind::F32,
            ColumnType::Float | ColumnType::Double => NativeKind::F64,
            ColumnType::Numeric | ColumnType::Decimal => NativeKind::Decimal,
            ColumnType::Bit | ColumnType::Boolean => NativeKind::Bool,
            ColumnType::Date => NativeKind::Date,
            ColumnType::Time => NativeKind::Time,
            ColumnType::Timestamp => NativeKind::Timestamp,
            _ if self.is_character() => NativeKind::Text,
            _ => return None,
        };
        Some(kind)
    }

    /// True for CHAR, VARCHAR and their long/national variants.
    pub fn is_character(self) -> bool {
        self.family() == TypeFamily::Character
    }

    /// SQL name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Bit => "BIT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Char => "CHAR",
            ColumnType::VarChar => "VARCHAR",
            ColumnType::LongVarChar => "LONGVARCHAR",
            ColumnType::NChar => "NCHAR",
            ColumnType::NVarChar => "NVARCHAR",
            ColumnType::LongNVarChar => "LONGNVARCHAR",
            ColumnType::Binary => "BINARY",
            ColumnType::VarBinary => "VARBINARY",
            ColumnType::LongVarBinary => "LONGVARBINARY",
            ColumnType::Blob => "BLOB",
            ColumnType::Clob => "CLOB",
            ColumnType::Array => "ARRAY",
            ColumnType::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Other(code) => write!(f, "OTHER({code})"),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for ColumnType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let column_type = match upper.as_str() {
            "TINYINT" => ColumnType::TinyInt,
            "SMALLINT" => ColumnType::SmallInt,
            "INTEGER" | "INT" => ColumnType::Integer,
            "BIGINT" => ColumnType::BigInt,
            "REAL" => ColumnType::Real,
            "FLOAT" => ColumnType::Float,
            "DOUBLE" | "DOUBLE PRECISION" => ColumnType::Double,
            "NUMERIC" => ColumnType::Numeric,
            "DECIMAL" => ColumnType::Decimal,
            "BIT" => ColumnType::Bit,
            "BOOLEAN" | "BOOL" => ColumnType::Boolean,
            "DATE" => ColumnType::Date,
            "TIME" => ColumnType::Time,
            "TIMESTAMP" | "DATETIME" => ColumnType::Timestamp,
            "CHAR" => ColumnType::Char,
            "VARCHAR" => ColumnType::VarChar,
            "LONGVARCHAR" => ColumnType::LongVarChar,
            "NCHAR" => ColumnType::NChar,
            "NVARCHAR" => ColumnType::NVarChar,
            "LONGNVARCHAR" => ColumnType::LongNVarChar,
            "BINARY" => ColumnType::Binary,
            "VARBINARY" => ColumnType::VarBinary,
            "LONGVARBINARY" => ColumnType::LongVarBinary,
            "BLOB" => ColumnType::Blob,
            "CLOB" => ColumnType::Clob,
            "ARRAY" => ColumnType::Array,
            _ => {
                return Err(CodecError::UnknownTypeName {
                    name: s.to_string(),
                })
            }
        };
        Ok(column_type)
    }
}
