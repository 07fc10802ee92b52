//! Value transfer between one text buffer and one cursor column.

use std::cell::Cell;
use std::rc::Rc;

use crate::buffer::{BufferEvent, TextBuffer};
use crate::config::FieldOptions;
use crate::cursor::{CursorEvent, RowCursor};
use crate::error::BindError;
use crate::types::{CodecRegistry, Decoded, SqlValue};

use super::column::ResolvedColumn;
use super::WriteOutcome;

/// Marks a transfer in progress; cleared on drop.
struct TransferGuard<'a>(&'a Cell<bool>);

impl<'a> TransferGuard<'a> {
    /// Returns `None` if a transfer is already running.
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for TransferGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Live binding state shared with the listener closures.
///
/// Both directions run under the same re-entrancy flag, so the notification
/// a transfer causes on the opposite side is ignored.
pub(crate) struct Relay {
    pub(crate) cursor: Rc<dyn RowCursor>,
    buffer: Rc<dyn TextBuffer>,
    pub(crate) column: ResolvedColumn,
    options: FieldOptions,
    codecs: Rc<CodecRegistry>,
    transferring: Cell<bool>,
}

impl Relay {
    pub(crate) fn new(
        cursor: Rc<dyn RowCursor>,
        buffer: Rc<dyn TextBuffer>,
        column: ResolvedColumn,
        options: FieldOptions,
        codecs: Rc<CodecRegistry>,
    ) -> Self {
        Self {
            cursor,
            buffer,
            column,
            options,
            codecs,
            transferring: Cell::new(false),
        }
    }

    /// Decodes the buffer and writes it to the current row.
    ///
    /// Returns `Skipped` without touching the cursor if another transfer is
    /// running or the text is a partial date/time.
    pub(crate) fn write_through(&self) -> Result<WriteOutcome, BindError> {
        let Some(_guard) = TransferGuard::enter(&self.transferring) else {
            return Ok(WriteOutcome::Skipped);
        };
        self.buffer_to_cursor()
    }

    /// Replaces the buffer with the current row's encoded value, or clears it
    /// when there is no current row.
    pub(crate) fn refresh(&self) -> Result<(), BindError> {
        let Some(_guard) = TransferGuard::enter(&self.transferring) else {
            return Ok(());
        };
        self.cursor_to_buffer()
    }

    pub(crate) fn on_buffer_event(&self, event: BufferEvent) {
        let Some(_guard) = TransferGuard::enter(&self.transferring) else {
            return;
        };
        match self.buffer_to_cursor() {
            Ok(outcome) => tracing::debug!(
                "Buffer {:?} on column {}: {:?}",
                event,
                self.column.name,
                outcome
            ),
            Err(e) => tracing::warn!("Write-through to column {} failed: {}", self.column.name, e),
        }
    }

    pub(crate) fn on_cursor_event(&self, event: CursorEvent) {
        let Some(_guard) = TransferGuard::enter(&self.transferring) else {
            return;
        };
        match self.cursor_to_buffer() {
            Ok(()) => tracing::debug!("Cursor {:?}: refreshed column {}", event, self.column.name),
            Err(e) => tracing::warn!("Refresh of column {} failed: {}", self.column.name, e),
        }
    }

    fn buffer_to_cursor(&self) -> Result<WriteOutcome, BindError> {
        let text = self.buffer.text();
        let decoded = self.codecs.decode(
            &self.column.name,
            self.column.column_type,
            Some(&text),
            &self.options,
        )?;
        match decoded {
            Decoded::Incomplete => Ok(WriteOutcome::Skipped),
            Decoded::Value(SqlValue::Null) => {
                self.require_row()?;
                self.cursor.set_null(self.column.index)?;
                Ok(WriteOutcome::WroteNull)
            }
            Decoded::Value(value) => {
                self.require_row()?;
                self.cursor.set_value(self.column.index, value)?;
                Ok(WriteOutcome::Written)
            }
        }
    }

    fn cursor_to_buffer(&self) -> Result<(), BindError> {
        let text = if self.cursor.current_row_exists() {
            let value = self.cursor.get_value(self.column.index)?;
            self.codecs
                .encode(&self.column.name, self.column.column_type, &value)?
                .unwrap_or_default()
        } else {
            String::new()
        };
        self.buffer.replace(&text);
        Ok(())
    }

    fn require_row(&self) -> Result<(), BindError> {
        if self.cursor.current_row_exists() {
            Ok(())
        } else {
            Err(BindError::NoCurrentRow)
        }
    }
}
