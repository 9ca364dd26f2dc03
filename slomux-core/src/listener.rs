//! Ordered listener registry with disposable subscriptions

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type ListenerFn = Rc<dyn Fn()>;

/// Identifier of a registered listener, unique per registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners in registration order
///
/// Notification iterates over a snapshot, so listeners may subscribe or
/// unsubscribe (or dispatch again) while being notified. Listeners added
/// during a notification are first called on the next one.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: RefCell<Vec<(ListenerId, ListenerFn)>>,
    next_id: Cell<u64>,
}

impl Listeners {
    pub(crate) fn add(self: &Rc<Self>, listener: ListenerFn) -> Subscription {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, listener));
        Subscription {
            id,
            registry: Rc::downgrade(self),
        }
    }

    fn remove(&self, id: ListenerId) -> bool {
        // Removed closures are dropped after the borrow ends: they may own
        // subscriptions of their own.
        let removed: Vec<_> = {
            let mut entries = self.entries.borrow_mut();
            let (gone, kept): (Vec<_>, Vec<_>) =
                entries.drain(..).partition(|(entry, _)| *entry == id);
            *entries = kept;
            gone
        };
        !removed.is_empty()
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry, _)| *entry == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Call every listener once, in registration order. Returns how many ran.
    pub(crate) fn notify(&self) -> usize {
        let snapshot: Vec<ListenerFn> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }
}

/// Handle to a registered listener
///
/// Dropping the handle (or calling [`unsubscribe`](Self::unsubscribe))
/// removes the listener. Use [`detach`](Self::detach) to keep the listener
/// for as long as the store lives.
#[must_use = "dropping a Subscription removes its listener; call `detach()` to keep it"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Listeners>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live store
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Remove the listener now. Returns `false` if it was already gone.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    /// Keep the listener registered for the lifetime of the store
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }

    fn release(&mut self) -> bool {
        let registry = std::mem::take(&mut self.registry);
        registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> ListenerFn {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(tag))
    }

    #[test]
    fn test_notify_in_registration_order() {
        let listeners = Rc::new(Listeners::default());
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = listeners.add(recorder(&log, "a"));
        let b = listeners.add(recorder(&log, "b"));
        let c = listeners.add(recorder(&log, "c"));

        assert_eq!(listeners.notify(), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);

        a.detach();
        b.detach();
        c.detach();
    }

    #[test]
    fn test_drop_removes_listener() {
        let listeners = Rc::new(Listeners::default());
        let log = Rc::new(RefCell::new(Vec::new()));

        let sub = listeners.add(recorder(&log, "a"));
        assert!(sub.is_active());
        drop(sub);

        assert_eq!(listeners.len(), 0);
        assert_eq!(listeners.notify(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_twice_reports_false() {
        let listeners = Rc::new(Listeners::default());
        let sub = listeners.add(Rc::new(|| {}));
        let id = sub.id();

        assert!(sub.unsubscribe());
        assert!(!listeners.contains(id));
        assert!(!listeners.remove(id));
    }

    #[test]
    fn test_detach_keeps_listener() {
        let listeners = Rc::new(Listeners::default());
        listeners.add(Rc::new(|| {})).detach();
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let listeners = Rc::new(Listeners::default());
        let sub = listeners.add(Rc::new(|| {}));
        drop(listeners);

        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }

    #[test]
    fn test_listener_may_unsubscribe_during_notify() {
        let listeners = Rc::new(Listeners::default());
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let slot_in = Rc::clone(&slot);
        let calls_in = Rc::clone(&calls);
        let sub = listeners.add(Rc::new(move || {
            calls_in.set(calls_in.get() + 1);
            slot_in.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        assert_eq!(listeners.notify(), 1);
        assert_eq!(listeners.notify(), 0);
        assert_eq!(calls.get(), 1);
    }
}
