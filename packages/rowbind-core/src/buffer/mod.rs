//! Editable text buffer contract and the in-memory document.

mod text_document;

use std::rc::Rc;

use crate::error::BindError;

pub use crate::listeners::SubscriptionId;
pub use text_document::TextDocument;

/// Edit notification fired by a text buffer.
///
/// Offsets and lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEvent {
    Inserted { offset: usize, len: usize },
    Removed { offset: usize, len: usize },
    /// Whole content replaced
    Replaced,
}

/// Callback registered on a text buffer.
pub type BufferListener = Rc<dyn Fn(BufferEvent)>;

/// Editable string content a user manipulates directly.
pub trait TextBuffer {
    /// Full current text.
    fn text(&self) -> String;

    /// Replaces the full text. Fires [`BufferEvent::Replaced`].
    fn replace(&self, text: &str);

    /// Inserts `text` at a character offset. Fires [`BufferEvent::Inserted`].
    fn insert(&self, offset: usize, text: &str) -> Result<(), BindError>;

    /// Removes `len` characters at `offset`. Fires [`BufferEvent::Removed`].
    fn remove(&self, offset: usize, len: usize) -> Result<(), BindError>;

    /// Registers an edit listener.
    fn subscribe(&self, listener: BufferListener) -> SubscriptionId;

    /// Releases a subscription. Returns `false` if the token was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Clears the text.
    fn clear(&self) {
        self.replace("");
    }

    /// Length in characters.
    fn len(&self) -> usize {
        self.text().chars().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
