//! Event source plumbing.
//!
//! A cursor listens to eight pointer channels. Hosts expose them through
//! [`EventSource`]; [`Subscription`] owns the resulting listener ids and
//! releases them when stopped or dropped, so a torn-down cursor can never keep
//! receiving events.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::input::{EventKind, PointerEvent};

/// Listener callback.
pub type Handler = Box<dyn FnMut(&PointerEvent)>;

/// Identifies one installed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Something that delivers pointer events to listeners.
pub trait EventSource {
    fn subscribe(&self, kind: EventKind, handler: Handler) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// Single-threaded in-process event source.
///
/// Handlers run synchronously inside [`EventBus::dispatch`] and must not
/// subscribe or unsubscribe while running.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(ListenerId, EventKind, Handler)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener of its kind, in subscription order.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let kind = event.kind();
        let mut listeners = self.listeners.borrow_mut();
        let mut delivered = 0;
        for (_, listener_kind, handler) in listeners.iter_mut() {
            if *listener_kind == kind {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, handler));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(listener, _, _)| *listener != id);
    }
}

/// Listeners installed on a source, released together.
#[must_use = "dropping a Subscription unsubscribes its listeners"]
pub struct Subscription {
    source: Rc<dyn EventSource>,
    ids: Vec<ListenerId>,
}

impl Subscription {
    pub fn new(source: Rc<dyn EventSource>) -> Self {
        Self {
            source,
            ids: Vec::new(),
        }
    }

    /// Install `handler` for `kind` and track it.
    pub fn listen(&mut self, kind: EventKind, handler: Handler) {
        let id = self.source.subscribe(kind, handler);
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unsubscribe everything now.
    pub fn stop(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        debug!(listeners = self.ids.len(), "releasing event subscription");
        for id in self.ids.drain(..) {
            self.source.unsubscribe(id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("ids", &self.ids).finish()
    }
}
