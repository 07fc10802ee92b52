//! Row cursor contract and the in-memory row set.

mod memory_row_set;

use std::rc::Rc;

use crate::error::BindError;
use crate::types::{ColumnType, SqlValue};

pub use crate::listeners::SubscriptionId;
pub use memory_row_set::MemoryRowSet;

/// Notification fired by a row cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    /// A value in the current row changed, or its edits were committed or cancelled
    RowChanged,
    /// The cursor moved to another row
    CursorMoved,
    /// Rows were inserted, deleted, or reloaded
    RowSetChanged,
}

/// Callback registered on a row cursor.
pub type CursorListener = Rc<dyn Fn(CursorEvent)>;

/// Column metadata reported by a row cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,
    /// Declared SQL type
    pub column_type: ColumnType,
    /// Whether the column accepts null
    pub nullable: bool,
}

impl ColumnMeta {
    /// Creates metadata for a nullable column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// A live pointer into query result rows with per-column read/write.
///
/// Columns are addressed by zero-based index. All methods take `&self`;
/// implementations use interior mutability and must release any internal
/// borrows before notifying listeners, since listeners read back through
/// the same cursor.
pub trait RowCursor {
    /// Whether the cursor is positioned on a row.
    fn current_row_exists(&self) -> bool;

    /// Reads a column of the current row.
    fn get_value(&self, column: usize) -> Result<SqlValue, BindError>;

    /// Writes a column of the current row. Fires [`CursorEvent::RowChanged`].
    fn set_value(&self, column: usize, value: SqlValue) -> Result<(), BindError>;

    /// Writes null to a column of the current row. Fires [`CursorEvent::RowChanged`].
    fn set_null(&self, column: usize) -> Result<(), BindError>;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Metadata of one column.
    fn column_meta(&self, column: usize) -> Result<ColumnMeta, BindError>;

    /// Declared type of one column.
    fn column_type(&self, column: usize) -> Result<ColumnType, BindError> {
        Ok(self.column_meta(column)?.column_type)
    }

    /// Name of the column at `column`.
    fn column_name(&self, column: usize) -> Result<String, BindError> {
        Ok(self.column_meta(column)?.name)
    }

    /// Index of the column called `name`, compared ASCII case-insensitively.
    fn column_index(&self, name: &str) -> Result<usize, BindError> {
        for index in 0..self.column_count() {
            if self.column_meta(index)?.name.eq_ignore_ascii_case(name) {
                return Ok(index);
            }
        }
        Err(BindError::ColumnNotFound {
            name: name.to_string(),
        })
    }

    /// Registers a listener for all three notification kinds.
    fn subscribe(&self, listener: CursorListener) -> SubscriptionId;

    /// Releases a subscription. Returns `false` if the token was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
