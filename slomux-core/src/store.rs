//! Centralized state store with reducer pattern and change listeners

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dispatch::Dispatch;
use crate::listener::{Listeners, Subscription};
use crate::Action;

/// A reducer computes the next state from the current state and an action
///
/// The input is never mutated. Returning `Rc::clone(state)` signals that the
/// action did not apply; the store then keeps the identical state reference.
pub type Reducer<S, A> = fn(&Rc<S>, A) -> Rc<S>;

/// Store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Label attached to this store's log events
    pub name: Cow<'static, str>,
    /// Emit a `debug` event for every dispatched action
    pub log_actions: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("store"),
            log_actions: true,
        }
    }
}

impl StoreConfig {
    /// Default settings with a custom log label
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Read side of a store: current state and change subscription
///
/// This is what selector hooks receive through context. It cannot dispatch.
pub struct StateRef<S> {
    state: Rc<RefCell<Rc<S>>>,
    listeners: Rc<Listeners>,
}

impl<S: 'static> StateRef<S> {
    fn new(state: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(Rc::new(state))),
            listeners: Rc::new(Listeners::default()),
        }
    }

    /// The current state
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    /// Register a listener called after every dispatch
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.listeners.add(Rc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// A handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakStateRef<S> {
        WeakStateRef {
            state: Rc::downgrade(&self.state),
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    fn replace(&self, next: Rc<S>) {
        *self.state.borrow_mut() = next;
    }
}

impl<S> Clone for StateRef<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<S: fmt::Debug + 'static> fmt::Debug for StateRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRef")
            .field("state", &self.state())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Non-owning [`StateRef`], used by listeners that the store itself holds
pub struct WeakStateRef<S> {
    state: Weak<RefCell<Rc<S>>>,
    listeners: Weak<Listeners>,
}

impl<S> WeakStateRef<S> {
    pub fn upgrade(&self) -> Option<StateRef<S>> {
        Some(StateRef {
            state: self.state.upgrade()?,
            listeners: self.listeners.upgrade()?,
        })
    }
}

impl<S> Clone for WeakStateRef<S> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
            listeners: Weak::clone(&self.listeners),
        }
    }
}

struct Shared<S, A> {
    reader: StateRef<S>,
    reducer: Reducer<S, A>,
    config: StoreConfig,
}

/// Centralized state store with a Redux-like reducer
///
/// The store owns the state and the ordered listener list. It is a cheap,
/// cloneable handle; clones share the same state. State is reachable only
/// through [`state`](Self::state) and replaced only by
/// [`dispatch`](Self::dispatch).
///
/// # Example
/// ```ignore
/// #[derive(Clone, Debug, PartialEq)]
/// struct AppState {
///     counter: i32,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum MyAction {
///     Increment,
///     Decrement,
/// }
///
/// fn reducer(state: &Rc<AppState>, action: MyAction) -> Rc<AppState> {
///     match action {
///         MyAction::Increment => Rc::new(AppState { counter: state.counter + 1 }),
///         MyAction::Decrement => Rc::new(AppState { counter: state.counter - 1 }),
///     }
/// }
///
/// let store = Store::new(AppState { counter: 0 }, reducer);
/// let sub = store.subscribe(|| println!("changed"));
/// store.dispatch(MyAction::Increment);
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A: Action> {
    shared: Rc<Shared<S, A>>,
}

impl<S: 'static, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_config(state, reducer, StoreConfig::default())
    }

    /// Create a new store with explicit settings
    pub fn with_config(state: S, reducer: Reducer<S, A>, config: StoreConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                reader: StateRef::new(state),
                reducer,
                config,
            }),
        }
    }

    /// The current state
    pub fn state(&self) -> Rc<S> {
        self.shared.reader.state()
    }

    /// Dispatch an action to the store
    ///
    /// Runs the reducer, replaces the state, then calls every listener in
    /// registration order before returning. Listeners run even when the
    /// reducer returned the identical state. Panics from the reducer or a
    /// listener propagate to the caller; listeners after a panicking one are
    /// not called.
    ///
    /// Returns `true` if the state reference changed.
    pub fn dispatch(&self, action: A) -> bool {
        let shared = &self.shared;
        let current = shared.reader.state();
        let name = action.name();

        let next = (shared.reducer)(&current, action);
        let changed = !Rc::ptr_eq(&current, &next);
        shared.reader.replace(next);

        if shared.config.log_actions {
            tracing::debug!(store = %shared.config.name, action = name, changed, "Action dispatched");
        }

        let notified = shared.reader.listeners.notify();
        tracing::trace!(store = %shared.config.name, listeners = notified, "Listeners notified");

        changed
    }

    /// Register a listener called with no arguments after every dispatch
    ///
    /// The listener is not called immediately. Registering the same logic
    /// twice calls it twice per dispatch.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.shared.reader.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.reader.listener_count()
    }

    /// The read-only side of this store
    pub fn reader(&self) -> StateRef<S> {
        self.shared.reader.clone()
    }

    /// The write-only side of this store
    pub fn dispatcher(&self) -> Dispatch<A> {
        let store = self.clone();
        Dispatch::new(move |action| store.dispatch(action))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }
}

impl<S, A: Action> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: 'static, A: Action> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.shared.config.name)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        counter: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "INCREMENT",
                TestAction::Decrement => "DECREMENT",
                TestAction::NoOp => "NO_OP",
            }
        }
    }

    fn test_reducer(state: &Rc<TestState>, action: TestAction) -> Rc<TestState> {
        match action {
            TestAction::Increment => Rc::new(TestState {
                counter: state.counter + 1,
            }),
            TestAction::Decrement => Rc::new(TestState {
                counter: state.counter - 1,
            }),
            TestAction::NoOp => Rc::clone(state),
        }
    }

    fn counting_listener(calls: &Rc<Cell<usize>>) -> impl Fn() + 'static {
        let calls = Rc::clone(calls);
        move || calls.set(calls.get() + 1)
    }

    #[test]
    fn test_store_dispatch() {
        let store = Store::new(TestState::default(), test_reducer);

        assert!(store.dispatch(TestAction::Increment));
        assert_eq!(store.state().counter, 1);

        assert!(store.dispatch(TestAction::Increment));
        assert_eq!(store.state().counter, 2);

        assert!(store.dispatch(TestAction::Decrement));
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_store_noop_keeps_reference() {
        let store = Store::new(TestState::default(), test_reducer);
        let before = store.state();

        assert!(!store.dispatch(TestAction::NoOp));
        assert!(Rc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_state_is_not_mutated_in_place() {
        let store = Store::new(TestState::default(), test_reducer);
        let before = store.state();

        store.dispatch(TestAction::Increment);

        assert_eq!(before.counter, 0);
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_state_equals_fold_of_reducer() {
        let actions = vec![
            TestAction::Increment,
            TestAction::NoOp,
            TestAction::Increment,
            TestAction::Decrement,
            TestAction::Increment,
        ];
        let store = Store::new(TestState::default(), test_reducer);
        for action in actions.clone() {
            store.dispatch(action);
        }

        let folded = actions
            .into_iter()
            .fold(Rc::new(TestState::default()), |state, action| {
                test_reducer(&state, action)
            });
        assert_eq!(*store.state(), *folded);
    }

    #[test]
    fn test_listeners_run_once_in_order() {
        let store = Store::new(TestState::default(), test_reducer);
        let order = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<_> = (0..4)
            .map(|i| {
                let order = Rc::clone(&order);
                store.subscribe(move || order.borrow_mut().push(i))
            })
            .collect();

        store.dispatch(TestAction::Increment);
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
        drop(subs);
    }

    #[test]
    fn test_subscribe_does_not_call_listener() {
        let store = Store::new(TestState::default(), test_reducer);
        let calls = Rc::new(Cell::new(0));

        let _sub = store.subscribe(counting_listener(&calls));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_listeners_run_on_unchanged_state() {
        let store = Store::new(TestState::default(), test_reducer);
        let calls = Rc::new(Cell::new(0));
        let _sub = store.subscribe(counting_listener(&calls));

        store.dispatch(TestAction::NoOp);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_same_listener_twice_runs_twice() {
        let store = Store::new(TestState::default(), test_reducer);
        let calls = Rc::new(Cell::new(0));
        let listener = Rc::new(counting_listener(&calls));

        let first = Rc::clone(&listener);
        let second = Rc::clone(&listener);
        let _a = store.subscribe(move || first());
        let _b = store.subscribe(move || second());

        store.dispatch(TestAction::Increment);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_listener_sees_new_state() {
        let store = Store::new(TestState::default(), test_reducer);
        let seen = Rc::new(Cell::new(0));

        let reader = store.reader();
        let seen_in = Rc::clone(&seen);
        let _sub = store.subscribe(move || seen_in.set(reader.state().counter));

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Increment);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new(TestState::default(), test_reducer);
        let calls = Rc::new(Cell::new(0));

        let sub = store.subscribe(counting_listener(&calls));
        store.dispatch(TestAction::Increment);
        assert!(sub.unsubscribe());
        store.dispatch(TestAction::Increment);

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_reentrant_dispatch_from_listener() {
        let store = Store::new(TestState::default(), test_reducer);
        let inner = store.clone();
        let fired = Rc::new(Cell::new(false));
        let fired_in = Rc::clone(&fired);

        store
            .subscribe(move || {
                if !fired_in.replace(true) {
                    inner.dispatch(TestAction::Increment);
                }
            })
            .detach();

        store.dispatch(TestAction::Increment);
        assert_eq!(store.state().counter, 2);
    }

    #[test]
    fn test_dispatcher_and_reader_share_state() {
        let store = Store::new(TestState::default(), test_reducer);
        let dispatch = store.dispatcher();
        let reader = store.reader();

        assert!(dispatch.call(TestAction::Increment));
        assert_eq!(reader.state().counter, 1);
    }

    #[test]
    fn test_weak_reader_does_not_keep_store_alive() {
        let store = Store::new(TestState::default(), test_reducer);
        let weak = store.reader().downgrade();
        assert!(weak.upgrade().is_some());

        drop(store);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    #[should_panic(expected = "reducer fault")]
    fn test_reducer_panic_propagates() {
        fn faulty(_: &Rc<TestState>, _: TestAction) -> Rc<TestState> {
            panic!("reducer fault");
        }
        let store = Store::new(TestState::default(), faulty);
        store.dispatch(TestAction::Increment);
    }

    #[test]
    fn test_reducer_panic_skips_listeners() {
        fn faulty(_: &Rc<TestState>, _: TestAction) -> Rc<TestState> {
            panic!("reducer fault");
        }
        let store = Store::new(TestState::default(), faulty);
        let calls = Rc::new(Cell::new(0));
        let _sub = store.subscribe(counting_listener(&calls));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            store.dispatch(TestAction::Increment);
        }));

        assert!(result.is_err());
        assert_eq!(calls.get(), 0);
        assert_eq!(*store.state(), TestState::default());
    }

    #[test]
    fn test_listener_panic_stops_later_listeners() {
        let store = Store::new(TestState::default(), test_reducer);
        let before = Rc::new(Cell::new(0));
        let after = Rc::new(Cell::new(0));
        let _first = store.subscribe(counting_listener(&before));
        let _faulty = store.subscribe(|| panic!("listener fault"));
        let _last = store.subscribe(counting_listener(&after));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            store.dispatch(TestAction::Increment);
        }));

        assert!(result.is_err());
        assert_eq!(before.get(), 1);
        assert_eq!(after.get(), 0);
        // State was replaced before notification and the store stays usable
        assert_eq!(store.state().counter, 1);
        assert_eq!(store.listener_count(), 3);
    }

    #[test]
    fn test_config_name() {
        let store = Store::with_config(
            TestState::default(),
            test_reducer,
            StoreConfig::named("counter"),
        );
        assert_eq!(store.config().name, "counter");
        assert!(store.config().log_actions);
    }
}
