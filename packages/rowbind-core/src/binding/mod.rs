//! Bound fields: one text buffer kept in sync with one cursor column.
//!
//! A [`BoundField`] is either unbound (missing cursor or column) or bound.
//! While bound it holds one subscription on the cursor and one on the
//! buffer:
//! - Buffer edits are decoded and written to the cursor's current row
//! - Cursor notifications re-encode the current value into the buffer
//!
//! Failures inside notification handlers are logged and leave both sides
//! untouched; the programmatic [`BoundField::write_through`] and
//! [`BoundField::refresh`] return them instead.

mod column;
mod relay;

use std::fmt;
use std::rc::{Rc, Weak};

use crate::buffer::{SubscriptionId, TextBuffer};
use crate::config::FieldOptions;
use crate::cursor::RowCursor;
use crate::error::BindError;
use crate::types::{CodecRegistry, ColumnType};

pub use column::{ColumnRef, ResolvedColumn};
use relay::Relay;

/// Whether a field currently relays values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No cursor or no column assigned; no listeners attached
    Unbound,
    /// Listeners attached on both the buffer and the cursor
    Bound,
}

/// What a buffer-to-cursor transfer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A value was written to the current row
    Written,
    /// Null was written to the current row
    WroteNull,
    /// Nothing was written (partial date/time input, or a transfer already running)
    Skipped,
}

struct ActiveBinding {
    relay: Rc<Relay>,
    cursor_subscription: SubscriptionId,
    buffer_subscription: SubscriptionId,
}

/// A text buffer bound to one column of a row cursor.
///
/// The field owns its two subscriptions but not the cursor; any number of
/// fields may share one cursor.
pub struct BoundField {
    buffer: Rc<dyn TextBuffer>,
    cursor: Option<Rc<dyn RowCursor>>,
    column: Option<ColumnRef>,
    options: FieldOptions,
    codecs: Rc<CodecRegistry>,
    active: Option<ActiveBinding>,
}

impl BoundField {
    /// Creates an unbound field over `buffer` using the built-in codecs.
    pub fn new(buffer: Rc<dyn TextBuffer>) -> Self {
        Self {
            buffer,
            cursor: None,
            column: None,
            options: FieldOptions::default(),
            codecs: Rc::new(CodecRegistry::with_builtin_codecs()),
            active: None,
        }
    }

    /// Sets the decoding options used by the next bind.
    #[must_use]
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses a shared codec registry for the next bind.
    #[must_use]
    pub fn with_codecs(mut self, codecs: Rc<CodecRegistry>) -> Self {
        self.codecs = codecs;
        self
    }

    /// Binds to `column` of `cursor`, replacing any previous binding.
    ///
    /// # Returns
    /// `Err(BindError)` if the column cannot be resolved or its type has no
    /// codec. The field is left unbound in that case.
    pub fn bind(
        &mut self,
        cursor: Rc<dyn RowCursor>,
        column: impl Into<ColumnRef>,
    ) -> Result<(), BindError> {
        self.cursor = Some(cursor);
        self.column = Some(column.into());
        self.rebind()
    }

    /// Replaces the cursor, keeping the column identifier.
    pub fn set_cursor(&mut self, cursor: Rc<dyn RowCursor>) -> Result<(), BindError> {
        self.cursor = Some(cursor);
        self.rebind()
    }

    /// The cursor this field reads from, if any.
    pub fn cursor(&self) -> Option<&Rc<dyn RowCursor>> {
        self.cursor.as_ref()
    }

    /// Identifies the column by name. An empty name unbinds the field.
    pub fn set_column_name(&mut self, name: &str) -> Result<(), BindError> {
        self.column = Some(ColumnRef::from(name));
        self.rebind()
    }

    /// Identifies the column by zero-based index.
    pub fn set_column_index(&mut self, index: usize) -> Result<(), BindError> {
        self.column = Some(ColumnRef::Index(index));
        self.rebind()
    }

    /// Column name: the cursor's spelling once bound, otherwise the name
    /// given by the caller.
    pub fn column_name(&self) -> Option<&str> {
        match (&self.active, &self.column) {
            (Some(active), _) => Some(active.relay.column.name.as_str()),
            (None, Some(ColumnRef::Name(name))) if !name.is_empty() => Some(name.as_str()),
            _ => None,
        }
    }

    /// Column index: resolved once bound, otherwise the index given by the caller.
    pub fn column_index(&self) -> Option<usize> {
        match (&self.active, &self.column) {
            (Some(active), _) => Some(active.relay.column.index),
            (None, Some(ColumnRef::Index(index))) => Some(*index),
            _ => None,
        }
    }

    /// Column type, known only while bound.
    pub fn column_type(&self) -> Option<ColumnType> {
        self.resolved_column().map(|column| column.column_type)
    }

    /// Column resolved at bind time.
    pub fn resolved_column(&self) -> Option<&ResolvedColumn> {
        self.active.as_ref().map(|active| &active.relay.column)
    }

    pub fn state(&self) -> BindingState {
        if self.active.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    pub fn options(&self) -> FieldOptions {
        self.options
    }

    /// Replaces the decoding options, rebinding if bound.
    pub fn set_options(&mut self, options: FieldOptions) -> Result<(), BindError> {
        self.options = options;
        if self.is_bound() {
            self.rebind()?;
        }
        Ok(())
    }

    /// The buffer this field edits.
    pub fn buffer(&self) -> &Rc<dyn TextBuffer> {
        &self.buffer
    }

    /// Detaches both listeners and forgets the cursor.
    pub fn unbind(&mut self) {
        self.detach();
        self.cursor = None;
    }

    /// Writes the buffer to the current row outside of any notification.
    ///
    /// Unlike edits made through the buffer, failures are returned.
    pub fn write_through(&self) -> Result<WriteOutcome, BindError> {
        self.relay()?.write_through()
    }

    /// Reloads the buffer from the current row outside of any notification.
    pub fn refresh(&self) -> Result<(), BindError> {
        self.relay()?.refresh()
    }

    fn relay(&self) -> Result<&Relay, BindError> {
        self.active
            .as_ref()
            .map(|active| active.relay.as_ref())
            .ok_or(BindError::NotBound)
    }

    fn rebind(&mut self) -> Result<(), BindError> {
        self.detach();

        let (Some(cursor), Some(column)) = (&self.cursor, &self.column) else {
            return Ok(());
        };
        if column.is_empty() {
            return Ok(());
        }

        let resolved = ResolvedColumn::resolve(&**cursor, column, &self.codecs)?;
        let options = FieldOptions {
            allow_null: self.options.allow_null && resolved.nullable,
            ..self.options
        };
        tracing::debug!(
            "Binding column {} (index {}, {})",
            resolved.name,
            resolved.index,
            resolved.column_type
        );

        let relay = Rc::new(Relay::new(
            Rc::clone(cursor),
            Rc::clone(&self.buffer),
            resolved,
            options,
            Rc::clone(&self.codecs),
        ));

        let weak: Weak<Relay> = Rc::downgrade(&relay);
        let cursor_subscription = cursor.subscribe(Rc::new(move |event| {
            if let Some(relay) = weak.upgrade() {
                relay.on_cursor_event(event);
            }
        }));
        let weak: Weak<Relay> = Rc::downgrade(&relay);
        let buffer_subscription = self.buffer.subscribe(Rc::new(move |event| {
            if let Some(relay) = weak.upgrade() {
                relay.on_buffer_event(event);
            }
        }));

        if relay.cursor.current_row_exists() {
            if let Err(e) = relay.refresh() {
                tracing::warn!(
                    "Initial load of column {} failed: {}",
                    relay.column.name,
                    e
                );
            }
        }

        self.active = Some(ActiveBinding {
            relay,
            cursor_subscription,
            buffer_subscription,
        });
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(active) = self.active.take() {
            active.relay.cursor.unsubscribe(active.cursor_subscription);
            self.buffer.unsubscribe(active.buffer_subscription);
            tracing::debug!("Unbound column {}", active.relay.column.name);
        }
    }
}

impl Drop for BoundField {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundField")
            .field("column", &self.column)
            .field("resolved", &self.resolved_column())
            .field("options", &self.options)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
