//! Shared fixtures for the integration tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;

use rowbind_core::{
    BindError, BufferEvent, ColumnMeta, ColumnType, CursorListener, MemoryRowSet, RowCursor,
    SqlValue, SubscriptionId, TextBuffer, TextDocument,
};

/// One write observed by [`RecordingCursor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Value(usize, SqlValue),
    Null(usize),
}

/// Row cursor that records every write before forwarding it to a
/// [`MemoryRowSet`], and can be told to reject writes.
pub struct RecordingCursor {
    pub inner: Rc<MemoryRowSet>,
    writes: RefCell<Vec<Write>>,
    reject_writes: Cell<bool>,
}

impl RecordingCursor {
    pub fn new(inner: Rc<MemoryRowSet>) -> Rc<Self> {
        Rc::new(Self {
            inner,
            writes: RefCell::new(Vec::new()),
            reject_writes: Cell::new(false),
        })
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    fn record(&self, write: Write) -> Result<(), BindError> {
        if self.reject_writes.get() {
            return Err(BindError::DataAccess("row set is read-only".to_string()));
        }
        self.writes.borrow_mut().push(write);
        Ok(())
    }
}

impl RowCursor for RecordingCursor {
    fn current_row_exists(&self) -> bool {
        self.inner.current_row_exists()
    }

    fn get_value(&self, column: usize) -> Result<SqlValue, BindError> {
        self.inner.get_value(column)
    }

    fn set_value(&self, column: usize, value: SqlValue) -> Result<(), BindError> {
        self.record(Write::Value(column, value.clone()))?;
        self.inner.set_value(column, value)
    }

    fn set_null(&self, column: usize) -> Result<(), BindError> {
        self.record(Write::Null(column))?;
        self.inner.set_null(column)
    }

    fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    fn column_meta(&self, column: usize) -> Result<ColumnMeta, BindError> {
        self.inner.column_meta(column)
    }

    fn subscribe(&self, listener: CursorListener) -> SubscriptionId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}

/// Collects the events a buffer fires.
pub fn record_buffer_events(buffer: &TextDocument) -> Rc<RefCell<Vec<BufferEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    buffer.subscribe(Rc::new(move |event| sink.borrow_mut().push(event)));
    events
}

/// Customer table used across the suite, positioned on the first row.
///
/// Columns: id INTEGER NOT NULL, name VARCHAR, born DATE, active BOOLEAN,
/// balance DECIMAL.
pub fn customers() -> Rc<MemoryRowSet> {
    let rows = MemoryRowSet::with_rows(
        vec![
            ColumnMeta::new("id", ColumnType::Integer).not_null(),
            ColumnMeta::new("name", ColumnType::VarChar),
            ColumnMeta::new("born", ColumnType::Date),
            ColumnMeta::new("active", ColumnType::Boolean),
            ColumnMeta::new("balance", ColumnType::Decimal),
        ],
        vec![
            vec![
                SqlValue::I32(1),
                "Ada".into(),
                NaiveDate::from_ymd_opt(1815, 12, 10).unwrap().into(),
                true.into(),
                "12.50".parse::<rust_decimal::Decimal>().unwrap().into(),
            ],
            vec![
                SqlValue::I32(2),
                "Grace".into(),
                SqlValue::Null,
                false.into(),
                SqlValue::Null,
            ],
        ],
    )
    .unwrap();
    rows.first();
    Rc::new(rows)
}

pub fn document() -> Rc<TextDocument> {
    Rc::new(TextDocument::new())
}
