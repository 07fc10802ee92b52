//! Column identification and bind-time type resolution.

use crate::cursor::RowCursor;
use crate::error::BindError;
use crate::types::{CodecRegistry, ColumnType};

/// Column identifier supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Name(String),
    /// Zero-based column index
    Index(usize),
}

impl ColumnRef {
    /// An empty name identifies no column.
    pub fn is_empty(&self) -> bool {
        matches!(self, ColumnRef::Name(name) if name.trim().is_empty())
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

/// Column resolved against a cursor's metadata, cached for one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Name as spelled by the cursor
    pub name: String,
    /// Zero-based index
    pub index: usize,
    /// Declared type
    pub column_type: ColumnType,
    /// Whether the column accepts null
    pub nullable: bool,
}

impl ResolvedColumn {
    /// Resolves `column` against `cursor`.
    ///
    /// Binding by name looks up the index and binding by index looks up the
    /// name, so both are always known afterwards.
    ///
    /// # Returns
    /// `Err(BindError)` if the column does not exist or its type has no
    /// codec in `codecs`.
    pub fn resolve(
        cursor: &dyn RowCursor,
        column: &ColumnRef,
        codecs: &CodecRegistry,
    ) -> Result<Self, BindError> {
        let index = match column {
            ColumnRef::Name(name) => cursor.column_index(name)?,
            ColumnRef::Index(index) => *index,
        };
        let meta = cursor.column_meta(index)?;
        codecs.require(&meta.name, meta.column_type)?;
        Ok(Self {
            name: meta.name,
            index,
            column_type: meta.column_type,
            nullable: meta.nullable,
        })
    }
}
