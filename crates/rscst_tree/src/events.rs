//! Mutation events dispatched by a program's event bus.
//!
//! Observers subscribe per [`EventKind`], a closed enumeration rather than
//! free-form event-name strings, so a misspelled subscription is a compile
//! error instead of a silent no-op. Dispatch is synchronous and ordered:
//! listeners run in registration order, each exactly once per mutation.

use crate::arena::ElementId;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// The closed set of events a program dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Elements were made indexable and observable via
    /// `Program::add_elements`.
    ElementsAdd,
    /// Elements were dropped from the index via
    /// `Program::remove_elements`.
    ElementsRemove,
}

/// Identifies one listener registration for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&[ElementId])>;

/// Ordered listener registry for one tree root.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `kind` and return a handle for removal.
    ///
    /// Registering the same callback several times is honored: each
    /// registration gets its own id and its own slot in dispatch order.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&[ElementId]) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove the listener registered under `id`.
    ///
    /// Removing an id that was never registered, or was already removed, is
    /// a no-op.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) {
        if let Some(listeners) = self.listeners.get_mut(&kind) {
            listeners.retain(|(listener_id, _)| *listener_id != id);
        }
    }

    /// The number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Invoke every listener registered for `kind`, in registration order,
    /// passing `elements`.
    ///
    /// The exclusive borrow taken here freezes the listener list for the
    /// duration of the dispatch, so every callback sees the registrations
    /// as of the moment dispatch began. A panicking listener propagates
    /// immediately; listeners registered before it have already run.
    pub(crate) fn emit(&mut self, kind: EventKind, elements: &[ElementId]) {
        if let Some(listeners) = self.listeners.get_mut(&kind) {
            debug!(
                "dispatching {:?} for {} element(s) to {} listener(s)",
                kind,
                elements.len(),
                listeners.len()
            );
            for (_, callback) in listeners.iter_mut() {
                callback(elements);
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts = f.debug_struct("EventBus");
        for (kind, listeners) in &self.listeners {
            counts.field(
                match kind {
                    EventKind::ElementsAdd => "elements_add",
                    EventKind::ElementsRemove => "elements_remove",
                },
                &listeners.len(),
            );
        }
        counts.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatch_follows_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second", "third"].iter().copied() {
            let log = Rc::clone(&log);
            bus.on(EventKind::ElementsAdd, move |_| {
                log.borrow_mut().push(tag);
            });
        }

        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn listeners_fire_once_per_emit_with_payload() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let sink = Rc::clone(&seen);
        bus.on(EventKind::ElementsAdd, move |elements| {
            sink.borrow_mut().push(elements.to_vec());
        });

        bus.emit(EventKind::ElementsAdd, &[]);
        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn kinds_are_independent() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let sink = Rc::clone(&count);
        bus.on(EventKind::ElementsRemove, move |_| {
            *sink.borrow_mut() += 1;
        });

        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(*count.borrow(), 0);
        bus.emit(EventKind::ElementsRemove, &[]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn off_removes_only_the_addressed_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first_log = Rc::clone(&log);
        let first = bus.on(EventKind::ElementsAdd, move |_| {
            first_log.borrow_mut().push("first");
        });
        let second_log = Rc::clone(&log);
        bus.on(EventKind::ElementsAdd, move |_| {
            second_log.borrow_mut().push("second");
        });

        bus.off(EventKind::ElementsAdd, first);
        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn off_with_unknown_id_is_a_noop() {
        let mut bus = EventBus::new();
        let id = bus.on(EventKind::ElementsAdd, |_| {});
        bus.off(EventKind::ElementsRemove, id);
        assert_eq!(bus.listener_count(EventKind::ElementsAdd), 1);
        bus.off(EventKind::ElementsAdd, id);
        bus.off(EventKind::ElementsAdd, id);
        assert_eq!(bus.listener_count(EventKind::ElementsAdd), 0);
    }

    #[test]
    fn duplicate_registrations_are_independent() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let make = |count: &Rc<RefCell<i32>>| {
            let sink = Rc::clone(count);
            move |_: &[crate::arena::ElementId]| {
                *sink.borrow_mut() += 1;
            }
        };
        let first = bus.on(EventKind::ElementsAdd, make(&count));
        let second = bus.on(EventKind::ElementsAdd, make(&count));
        assert_ne!(first, second);

        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(*count.borrow(), 2);

        bus.off(EventKind::ElementsAdd, first);
        bus.emit(EventKind::ElementsAdd, &[]);
        assert_eq!(*count.borrow(), 3);
    }
}
