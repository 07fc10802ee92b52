//! In-memory row set.
//!
//! Holds:
//! - Fixed column metadata
//! - Rows of native values, each with an optional pre-edit snapshot
//! - A cursor position
//! - Listeners notified on every change

use std::cell::RefCell;

use crate::error::BindError;
use crate::listeners::ListenerSet;
use crate::types::SqlValue;

use super::{ColumnMeta, CursorEvent, CursorListener, RowCursor, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At(usize),
    AfterLast,
}

#[derive(Debug, Clone)]
struct Row {
    values: Vec<SqlValue>,
    /// Values before the first uncommitted edit
    original: Option<Vec<SqlValue>>,
}

impl Row {
    fn new(values: Vec<SqlValue>) -> Self {
        Self {
            values,
            original: None,
        }
    }
}

#[derive(Debug)]
struct RowSetState {
    rows: Vec<Row>,
    position: Position,
}

impl RowSetState {
    fn current_index(&self) -> Option<usize> {
        match self.position {
            Position::At(index) => Some(index),
            _ => None,
        }
    }
}

/// Row cursor over rows held in memory.
///
/// Values are type-checked against the column metadata on every write.
/// Edits stay pending on the row until [`commit_row`](Self::commit_row) or
/// [`cancel_row_updates`](Self::cancel_row_updates).
#[derive(Debug)]
pub struct MemoryRowSet {
    columns: Vec<ColumnMeta>,
    state: RefCell<RowSetState>,
    listeners: ListenerSet<CursorEvent>,
}

impl MemoryRowSet {
    /// Creates an empty row set with the given columns.
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self {
            columns,
            state: RefCell::new(RowSetState {
                rows: Vec::new(),
                position: Position::BeforeFirst,
            }),
            listeners: ListenerSet::new(),
        }
    }

    /// Creates a row set holding `rows`, positioned before the first row.
    ///
    /// # Returns
    /// `Err(BindError)` if any row has the wrong arity or a value that does
    /// not fit its column.
    pub fn with_rows(columns: Vec<ColumnMeta>, rows: Vec<Vec<SqlValue>>) -> Result<Self, BindError> {
        let row_set = Self::new(columns);
        let rows = row_set.validate_rows(rows)?;
        row_set.state.borrow_mut().rows = rows;
        Ok(row_set)
    }

    /// Column metadata in declaration order.
    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.state.borrow().rows.len()
    }

    /// Zero-based index of the current row.
    pub fn position(&self) -> Option<usize> {
        self.state.borrow().current_index()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Reads a value from any row without moving the cursor.
    pub fn value_at(&self, row: usize, column: usize) -> Result<SqlValue, BindError> {
        self.check_column(column)?;
        let state = self.state.borrow();
        let row = state.rows.get(row).ok_or(BindError::NoCurrentRow)?;
        Ok(row.values[column].clone())
    }

    /// Moves to the first row. Returns `false` if there are no rows.
    pub fn first(&self) -> bool {
        self.move_to(|_, len| {
            if len == 0 {
                Position::BeforeFirst
            } else {
                Position::At(0)
            }
        })
    }

    /// Moves to the last row. Returns `false` if there are no rows.
    pub fn last(&self) -> bool {
        self.move_to(|_, len| {
            if len == 0 {
                Position::AfterLast
            } else {
                Position::At(len - 1)
            }
        })
    }

    /// Advances one row. Returns `false` once past the last row.
    pub fn next(&self) -> bool {
        self.move_to(|position, len| match position {
            Position::BeforeFirst if len > 0 => Position::At(0),
            Position::At(index) if index + 1 < len => Position::At(index + 1),
            _ => Position::AfterLast,
        })
    }

    /// Steps back one row. Returns `false` once before the first row.
    pub fn previous(&self) -> bool {
        self.move_to(|position, len| match position {
            Position::AfterLast if len > 0 => Position::At(len - 1),
            Position::At(index) if index > 0 => Position::At(index - 1),
            _ => Position::BeforeFirst,
        })
    }

    /// Moves to a zero-based row index. Returns `false` if out of range.
    pub fn absolute(&self, index: usize) -> bool {
        self.move_to(|_, len| {
            if index < len {
                Position::At(index)
            } else {
                Position::AfterLast
            }
        })
    }

    /// Moves before the first row.
    pub fn before_first(&self) {
        self.move_to(|_, _| Position::BeforeFirst);
    }

    /// Appends a row and moves onto it.
    ///
    /// Fires [`CursorEvent::RowSetChanged`].
    pub fn insert_row(&self, values: Vec<SqlValue>) -> Result<(), BindError> {
        self.validate_row(&values)?;
        {
            let mut state = self.state.borrow_mut();
            state.rows.push(Row::new(values));
            state.position = Position::At(state.rows.len() - 1);
        }
        tracing::debug!("Inserted row {}", self.row_count());
        self.listeners.notify(CursorEvent::RowSetChanged);
        Ok(())
    }

    /// Deletes the current row.
    ///
    /// The cursor moves to the following row, or to the new last row when
    /// the deleted row was last. Fires [`CursorEvent::RowSetChanged`].
    pub fn delete_row(&self) -> Result<(), BindError> {
        {
            let mut state = self.state.borrow_mut();
            let index = state.current_index().ok_or(BindError::NoCurrentRow)?;
            state.rows.remove(index);
            let len = state.rows.len();
            state.position = if len == 0 {
                Position::BeforeFirst
            } else {
                Position::At(index.min(len - 1))
            };
        }
        self.listeners.notify(CursorEvent::RowSetChanged);
        Ok(())
    }

    /// Replaces every row and moves before the first one.
    ///
    /// Fires [`CursorEvent::RowSetChanged`].
    pub fn reload(&self, rows: Vec<Vec<SqlValue>>) -> Result<(), BindError> {
        let rows = self.validate_rows(rows)?;
        {
            let mut state = self.state.borrow_mut();
            state.rows = rows;
            state.position = Position::BeforeFirst;
        }
        tracing::debug!("Reloaded row set with {} rows", self.row_count());
        self.listeners.notify(CursorEvent::RowSetChanged);
        Ok(())
    }

    /// Whether the current row has uncommitted edits.
    pub fn is_row_dirty(&self) -> bool {
        let state = self.state.borrow();
        state
            .current_index()
            .is_some_and(|index| state.rows[index].original.is_some())
    }

    /// Whether any row has uncommitted edits.
    pub fn has_pending_changes(&self) -> bool {
        self.state.borrow().rows.iter().any(|row| row.original.is_some())
    }

    /// Accepts the current row's pending edits.
    ///
    /// # Returns
    /// `Ok(true)` if there were edits to accept. Fires
    /// [`CursorEvent::RowChanged`] in that case.
    pub fn commit_row(&self) -> Result<bool, BindError> {
        let committed = {
            let mut state = self.state.borrow_mut();
            let index = state.current_index().ok_or(BindError::NoCurrentRow)?;
            state.rows[index].original.take().is_some()
        };
        if committed {
            tracing::debug!("Committed row {:?}", self.position());
            self.listeners.notify(CursorEvent::RowChanged);
        }
        Ok(committed)
    }

    /// Reverts the current row's pending edits.
    ///
    /// # Returns
    /// `Ok(true)` if there were edits to revert. Fires
    /// [`CursorEvent::RowChanged`] in that case.
    pub fn cancel_row_updates(&self) -> Result<bool, BindError> {
        let reverted = {
            let mut state = self.state.borrow_mut();
            let index = state.current_index().ok_or(BindError::NoCurrentRow)?;
            let row = &mut state.rows[index];
            match row.original.take() {
                Some(original) => {
                    row.values = original;
                    true
                }
                None => false,
            }
        };
        if reverted {
            self.listeners.notify(CursorEvent::RowChanged);
        }
        Ok(reverted)
    }

    fn move_to(&self, target: impl FnOnce(Position, usize) -> Position) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            state.position = target(state.position, state.rows.len());
            state.current_index().is_some()
        };
        self.listeners.notify(CursorEvent::CursorMoved);
        moved
    }

    fn check_column(&self, column: usize) -> Result<&ColumnMeta, BindError> {
        self.columns
            .get(column)
            .ok_or(BindError::ColumnIndexOutOfRange {
                index: column,
                count: self.columns.len(),
            })
    }

    fn validate_value(meta: &ColumnMeta, value: &SqlValue) -> Result<(), BindError> {
        if value.is_null() {
            if !meta.nullable {
                return Err(BindError::NullConstraint {
                    column: meta.name.clone(),
                });
            }
            return Ok(());
        }
        match meta.column_type.native_kind() {
            Some(expected) if value.kind() != Some(expected) => Err(BindError::ValueTypeMismatch {
                column: meta.name.clone(),
                expected: expected.name().to_string(),
                got: value.kind_name().to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn validate_row(&self, values: &[SqlValue]) -> Result<(), BindError> {
        if values.len() != self.columns.len() {
            return Err(BindError::RowArityMismatch {
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        for (meta, value) in self.columns.iter().zip(values) {
            Self::validate_value(meta, value)?;
        }
        Ok(())
    }

    fn validate_rows(&self, rows: Vec<Vec<SqlValue>>) -> Result<Vec<Row>, BindError> {
        rows.into_iter()
            .map(|values| {
                self.validate_row(&values)?;
                Ok(Row::new(values))
            })
            .collect()
    }

    fn write(&self, column: usize, value: SqlValue) -> Result<(), BindError> {
        let meta = self.check_column(column)?;
        Self::validate_value(meta, &value)?;
        {
            let mut state = self.state.borrow_mut();
            let index = state.current_index().ok_or(BindError::NoCurrentRow)?;
            let row = &mut state.rows[index];
            if row.original.is_none() {
                row.original = Some(row.values.clone());
            }
            row.values[column] = value;
        }
        self.listeners.notify(CursorEvent::RowChanged);
        Ok(())
    }
}

impl RowCursor for MemoryRowSet {
    fn current_row_exists(&self) -> bool {
        self.state.borrow().current_index().is_some()
    }

    fn get_value(&self, column: usize) -> Result<SqlValue, BindError> {
        self.check_column(column)?;
        let state = self.state.borrow();
        let index = state.current_index().ok_or(BindError::NoCurrentRow)?;
        Ok(state.rows[index].values[column].clone())
    }

    fn set_value(&self, column: usize, value: SqlValue) -> Result<(), BindError> {
        self.write(column, value)
    }

    fn set_null(&self, column: usize) -> Result<(), BindError> {
        self.write(column, SqlValue::Null)
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_meta(&self, column: usize) -> Result<ColumnMeta, BindError> {
        self.check_column(column).cloned()
    }

    fn subscribe(&self, listener: CursorListener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::ColumnType;

    fn people() -> MemoryRowSet {
        MemoryRowSet::with_rows(
            vec![
                ColumnMeta::new("id", ColumnType::Integer).not_null(),
                ColumnMeta::new("name", ColumnType::VarChar),
            ],
            vec![
                vec![SqlValue::I32(1), "Ada".into()],
                vec![SqlValue::I32(2), "Grace".into()],
                vec![SqlValue::I32(3), SqlValue::Null],
            ],
        )
        .unwrap()
    }

    fn record_events(rows: &MemoryRowSet) -> Rc<RefCell<Vec<CursorEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        rows.subscribe(Rc::new(move |event| sink.borrow_mut().push(event)));
        events
    }

    #[test]
    fn test_navigation() {
        let rows = people();
        assert!(!rows.current_row_exists());

        assert!(rows.next());
        assert_eq!(rows.position(), Some(0));
        assert!(rows.last());
        assert_eq!(rows.position(), Some(2));
        assert!(!rows.next());
        assert!(!rows.current_row_exists());
        assert!(rows.previous());
        assert_eq!(rows.position(), Some(2));
        assert!(rows.absolute(1));
        assert_eq!(rows.get_value(1).unwrap(), SqlValue::from("Grace"));
        assert!(!rows.absolute(9));
        rows.before_first();
        assert_eq!(rows.position(), None);
        assert!(!rows.previous());
    }

    #[test]
    fn test_navigation_fires_cursor_moved() {
        let rows = people();
        let events = record_events(&rows);
        rows.first();
        rows.next();
        assert_eq!(*events.borrow(), vec![CursorEvent::CursorMoved; 2]);
    }

    #[test]
    fn test_column_lookup() {
        let rows = people();
        assert_eq!(rows.column_index("NAME").unwrap(), 1);
        assert_eq!(rows.column_name(0).unwrap(), "id");
        assert_eq!(rows.column_type(1).unwrap(), ColumnType::VarChar);
        assert!(matches!(
            rows.column_index("email"),
            Err(BindError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            rows.column_meta(5),
            Err(BindError::ColumnIndexOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn test_write_validates_and_notifies() {
        let rows = people();
        assert_eq!(rows.set_value(0, SqlValue::I32(9)), Err(BindError::NoCurrentRow));

        rows.first();
        let events = record_events(&rows);

        rows.set_value(0, SqlValue::I32(10)).unwrap();
        assert_eq!(rows.get_value(0).unwrap(), SqlValue::I32(10));
        assert_eq!(*events.borrow(), vec![CursorEvent::RowChanged]);

        assert!(matches!(
            rows.set_value(0, "ten".into()),
            Err(BindError::ValueTypeMismatch { .. })
        ));
        assert_eq!(
            rows.set_null(0),
            Err(BindError::NullConstraint { column: "id".into() })
        );
        rows.set_null(1).unwrap();
        assert_eq!(rows.get_value(1).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_commit_and_cancel() {
        let rows = people();
        rows.first();
        assert!(!rows.is_row_dirty());

        rows.set_value(1, "Lovelace".into()).unwrap();
        assert!(rows.is_row_dirty());
        assert!(rows.cancel_row_updates().unwrap());
        assert_eq!(rows.get_value(1).unwrap(), SqlValue::from("Ada"));
        assert!(!rows.is_row_dirty());

        rows.set_value(1, "Lovelace".into()).unwrap();
        assert!(rows.has_pending_changes());
        assert!(rows.commit_row().unwrap());
        assert!(!rows.has_pending_changes());
        assert!(!rows.cancel_row_updates().unwrap());
        assert_eq!(rows.get_value(1).unwrap(), SqlValue::from("Lovelace"));
    }

    #[test]
    fn test_insert_and_delete() {
        let rows = people();
        let events = record_events(&rows);

        rows.insert_row(vec![SqlValue::I32(4), "Edsger".into()]).unwrap();
        assert_eq!(rows.row_count(), 4);
        assert_eq!(rows.position(), Some(3));

        assert!(matches!(
            rows.insert_row(vec![SqlValue::I32(5)]),
            Err(BindError::RowArityMismatch { expected: 2, got: 1 })
        ));

        rows.delete_row().unwrap();
        assert_eq!(rows.row_count(), 3);
        assert_eq!(rows.position(), Some(2));
        assert_eq!(
            *events.borrow(),
            vec![CursorEvent::RowSetChanged, CursorEvent::RowSetChanged]
        );
    }

    #[test]
    fn test_reload() {
        let rows = people();
        rows.first();
        rows.reload(vec![vec![SqlValue::I32(7), "Barbara".into()]])
            .unwrap();
        assert_eq!(rows.row_count(), 1);
        assert_eq!(rows.position(), None);
        assert_eq!(rows.value_at(0, 1).unwrap(), SqlValue::from("Barbara"));
    }

    #[test]
    fn test_listener_may_read_back() {
        let rows = Rc::new(people());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (reader, sink) = (Rc::clone(&rows), Rc::clone(&seen));
        let id = rows.subscribe(Rc::new(move |_| {
            sink.borrow_mut().push(reader.get_value(0).ok());
        }));

        rows.first();
        rows.set_value(0, SqlValue::I32(42)).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![Some(SqlValue::I32(1)), Some(SqlValue::I32(42))]
        );

        assert!(rows.unsubscribe(id));
        assert!(!rows.unsubscribe(id));
        assert_eq!(rows.listener_count(), 0);
    }
}
