//! End-to-end relay behavior observed through a recording cursor.

use std::rc::Rc;

use chrono::NaiveDate;

use rowbind_core::{
    BindError, BoundField, BufferEvent, CodecError, ColumnMeta, ColumnType, MemoryRowSet,
    RowCursor, SqlValue, TextBuffer, WriteOutcome,
};

use super::helpers::{customers, document, record_buffer_events, RecordingCursor, Write};

/// Integer column: the buffer shows the stored value and an edit writes the
/// parsed number exactly once.
#[test]
fn test_integer_round_trip() {
    let rows = MemoryRowSet::with_rows(
        vec![ColumnMeta::new("qty", ColumnType::Integer)],
        vec![vec![SqlValue::I32(42)]],
    )
    .unwrap();
    rows.first();
    let cursor = RecordingCursor::new(Rc::new(rows));
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "qty").unwrap();

    assert_eq!(doc.text(), "42");
    assert!(cursor.writes().is_empty());

    doc.replace("43");
    assert_eq!(cursor.writes(), vec![Write::Value(0, SqlValue::I32(43))]);
    assert_eq!(doc.text(), "43");
}

/// Date column: nothing is written until the text is a full date.
#[test]
fn test_partial_date_not_written() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "born").unwrap();
    assert_eq!(doc.text(), "12/10/1815");

    doc.replace("");
    cursor.clear_writes();
    for (i, ch) in "12/25/2024".chars().enumerate() {
        doc.insert(i, &ch.to_string()).unwrap();
        if i < 9 {
            assert!(cursor.writes().is_empty(), "wrote after {} chars", i + 1);
        }
    }

    assert_eq!(
        cursor.writes(),
        vec![Write::Value(
            2,
            SqlValue::Date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap())
        )]
    );
}

/// Character column: clearing the buffer writes null.
#[test]
fn test_cleared_varchar_writes_null() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "name").unwrap();
    assert_eq!(doc.text(), "Ada");

    doc.remove(0, 3).unwrap();
    assert_eq!(cursor.writes(), vec![Write::Null(1)]);
    assert_eq!(cursor.get_value(1).unwrap(), SqlValue::Null);
}

/// Boolean column: unrecognized text decodes to false under the default policy.
#[test]
fn test_lenient_boolean() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "active").unwrap();
    assert_eq!(doc.text(), "true");

    doc.replace("maybe");
    assert_eq!(cursor.writes(), vec![Write::Value(3, SqlValue::Bool(false))]);

    doc.replace("TRUE");
    assert_eq!(cursor.get_value(3).unwrap(), SqlValue::Bool(true));
}

/// Moving off the rows clears the buffer without writing.
#[test]
fn test_no_current_row_clears_buffer() {
    let rows = customers();
    let cursor = RecordingCursor::new(rows.clone());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "name").unwrap();

    rows.last();
    assert_eq!(doc.text(), "Grace");
    rows.next();
    assert_eq!(doc.text(), "");
    assert!(cursor.writes().is_empty());

    // typing with no row is logged and dropped
    doc.replace("Linus");
    assert!(cursor.writes().is_empty());
    assert_eq!(field.write_through(), Err(BindError::NoCurrentRow));
}

/// Two fields on one cursor: an edit in one refreshes the other to the
/// value already stored, and neither echoes back.
#[test]
fn test_shared_cursor_fields() {
    let rows = customers();
    let cursor = RecordingCursor::new(rows.clone());
    let name_doc = document();
    let active_doc = document();
    let mut name = BoundField::new(name_doc.clone());
    let mut active = BoundField::new(active_doc.clone());
    name.bind(cursor.clone(), "name").unwrap();
    active.bind(cursor.clone(), "active").unwrap();
    assert_eq!(rows.listener_count(), 2);

    let active_events = record_buffer_events(&active_doc);
    name_doc.replace("Ada Lovelace");

    assert_eq!(cursor.writes(), vec![Write::Value(1, "Ada Lovelace".into())]);
    assert_eq!(active_doc.text(), "true");
    assert_eq!(*active_events.borrow(), vec![BufferEvent::Replaced]);
    assert_eq!(name_doc.text(), "Ada Lovelace");

    rows.next();
    assert_eq!(name_doc.text(), "Grace");
    assert_eq!(active_doc.text(), "false");
    assert_eq!(cursor.writes().len(), 1);
}

/// The refresh a write causes never re-enters the write path.
#[test]
fn test_no_echo_write() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "balance").unwrap();
    assert_eq!(doc.text(), "12.50");

    let events = record_buffer_events(&doc);
    doc.replace("99.5");
    assert_eq!(cursor.writes().len(), 1);
    assert_eq!(*events.borrow(), vec![BufferEvent::Replaced]);

    field.refresh().unwrap();
    assert_eq!(doc.text(), "99.5");
    assert_eq!(cursor.writes().len(), 1);
}

#[test]
fn test_rejected_write_keeps_text() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "name").unwrap();

    cursor.reject_writes(true);
    doc.replace("Read only");
    assert_eq!(doc.text(), "Read only");
    assert_eq!(cursor.get_value(1).unwrap(), SqlValue::from("Ada"));
    assert!(matches!(field.write_through(), Err(BindError::DataAccess(_))));

    cursor.reject_writes(false);
    assert_eq!(field.write_through(), Ok(WriteOutcome::Written));
    assert_eq!(cursor.get_value(1).unwrap(), SqlValue::from("Read only"));
}

#[test]
fn test_not_null_column_refuses_empty() {
    let cursor = RecordingCursor::new(customers());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "id").unwrap();

    doc.clear();
    assert!(cursor.writes().is_empty());
    assert_eq!(
        field.write_through(),
        Err(BindError::Codec(CodecError::NullNotAllowed {
            column: "id".to_string()
        }))
    );
}

#[test]
fn test_rebinding_does_not_duplicate_writes() {
    let rows = customers();
    let cursor = RecordingCursor::new(rows.clone());
    let doc = document();
    let mut field = BoundField::new(doc.clone());
    field.bind(cursor.clone(), "name").unwrap();
    field.bind(cursor.clone(), "name").unwrap();
    field.set_column_index(1).unwrap();

    assert_eq!(rows.listener_count(), 1);
    assert_eq!(doc.listener_count(), 1);

    doc.replace("Once");
    assert_eq!(cursor.writes(), vec![Write::Value(1, "Once".into())]);
}
