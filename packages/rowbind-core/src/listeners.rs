//! Listener registration and notification fan-out.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Token returned by `subscribe`, used to release the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered set of listeners for one event type.
pub(crate) struct ListenerSet<E> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Fn(E)>)>>,
}

impl<E: Copy> ListenerSet<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe(&self, listener: Rc<dyn Fn(E)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Calls every listener in registration order.
    ///
    /// Works on a snapshot so listeners may subscribe, unsubscribe, or call
    /// back into the notifying object.
    pub(crate) fn notify(&self, event: E) {
        let snapshot: Vec<Rc<dyn Fn(E)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

impl<E> fmt::Debug for ListenerSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
