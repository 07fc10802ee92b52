//! Value codec and bidirectional binding relay between row cursors and
//! editable text buffers.
//!
//! Provides the column type system, the per-type text codecs, the row
//! cursor and text buffer contracts with in-memory implementations, and
//! the bound field that keeps one buffer in sync with one column.

pub mod binding;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod error;
mod listeners;
pub mod types;

pub use binding::{BindingState, BoundField, ColumnRef, ResolvedColumn, WriteOutcome};
pub use buffer::{BufferEvent, BufferListener, TextBuffer, TextDocument};
pub use config::{BindConfig, BooleanPolicy, FieldOptions};
pub use cursor::{ColumnMeta, CursorEvent, CursorListener, MemoryRowSet, RowCursor};
pub use error::BindError;
pub use listeners::SubscriptionId;
pub use types::{CodecError, CodecRegistry, ColumnType, Decoded, SqlValue};
