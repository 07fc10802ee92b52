use std::cell::RefCell;

use crate::error::BindError;
use crate::listeners::ListenerSet;

use super::{BufferEvent, BufferListener, SubscriptionId, TextBuffer};

/// In-memory text buffer.
#[derive(Debug)]
pub struct TextDocument {
    content: RefCell<String>,
    listeners: ListenerSet<BufferEvent>,
}

impl TextDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Creates a document holding `text`.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: RefCell::new(text.to_string()),
            listeners: ListenerSet::new(),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Byte index of a character offset, allowing the end position.
    fn byte_index(content: &str, offset: usize) -> Result<usize, BindError> {
        if offset == 0 {
            return Ok(0);
        }
        content
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(content.len()))
            .nth(offset)
            .ok_or(BindError::InvalidBufferOffset {
                offset,
                len: content.chars().count(),
            })
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for TextDocument {
    fn text(&self) -> String {
        self.content.borrow().clone()
    }

    fn replace(&self, text: &str) {
        {
            let mut content = self.content.borrow_mut();
            content.clear();
            content.push_str(text);
        }
        self.listeners.notify(BufferEvent::Replaced);
    }

    fn insert(&self, offset: usize, text: &str) -> Result<(), BindError> {
        {
            let mut content = self.content.borrow_mut();
            let at = Self::byte_index(&content, offset)?;
            content.insert_str(at, text);
        }
        self.listeners.notify(BufferEvent::Inserted {
            offset,
            len: text.chars().count(),
        });
        Ok(())
    }

    fn remove(&self, offset: usize, len: usize) -> Result<(), BindError> {
        {
            let mut content = self.content.borrow_mut();
            let start = Self::byte_index(&content, offset)?;
            let end = offset
                .checked_add(len)
                .ok_or(BindError::InvalidBufferOffset {
                    offset,
                    len: content.chars().count(),
                })
                .and_then(|end| Self::byte_index(&content, end))?;
            content.replace_range(start..end, "");
        }
        self.listeners.notify(BufferEvent::Removed { offset, len });
        Ok(())
    }

    fn subscribe(&self, listener: BufferListener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
