//! Selector hook: read a derived value and re-render only when it changes
//!
//! On every activation the hook recomputes the selected value from the
//! current state and returns it. On the first activation only, it also
//! registers one store listener for the instance. The listener recomputes
//! the value after each dispatch, compares it with the value the instance
//! last rendered, and requests a re-render only when the equality function
//! reports a difference. The subscription lives in the instance's hook cell
//! and is released when the instance is unmounted.

use std::any::type_name;
use std::cell::RefCell;
use std::rc::Rc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::host::Scope;
use crate::listener::Subscription;
use crate::store::{StateRef, Store};
use crate::Action;

/// Equality functions for [`use_selector_with`]
///
/// Each takes `(next, previous)` and returns `true` when no re-render is
/// needed.
pub mod equality {
    use std::rc::Rc;

    /// Value equality (the default for [`use_selector`](super::use_selector))
    pub fn partial_eq<T: PartialEq>(next: &T, previous: &T) -> bool {
        next == previous
    }

    /// Reference identity, for selectors returning shared state
    pub fn rc_ptr_eq<T: ?Sized>(next: &Rc<T>, previous: &Rc<T>) -> bool {
        Rc::ptr_eq(next, previous)
    }
}

struct SelectorCell<T> {
    last: Rc<RefCell<Option<T>>>,
    subscription: Option<Subscription>,
}

/// Select a value from the nearest provided store, compared with `PartialEq`
///
/// Fails with [`Error::NoStore`] when no provider for `S` is reachable.
///
/// ```ignore
/// let counter = use_selector(scope, |s: &CounterState| s.counter)?;
/// ```
pub fn use_selector<S, T, F>(scope: &mut Scope<'_>, selector: F) -> Result<T>
where
    S: 'static,
    T: Clone + PartialEq + 'static,
    F: Fn(&S) -> T + 'static,
{
    use_selector_with(scope, selector, equality::partial_eq)
}

/// Select a value, comparing successive values with `equality_fn(next, previous)`
///
/// ```ignore
/// let step = use_selector_with(
///     scope,
///     |s: &CounterState| s.step_size,
///     |current, prev| current == prev,
/// )?;
/// ```
pub fn use_selector_with<S, T, F, E>(scope: &mut Scope<'_>, selector: F, equality_fn: E) -> Result<T>
where
    S: 'static,
    T: Clone + 'static,
    F: Fn(&S) -> T + 'static,
    E: Fn(&T, &T) -> bool + 'static,
{
    let store = scope
        .context::<StateRef<S>>()
        .ok_or(Error::NoStore {
            state: type_name::<S>(),
        })?;
    select(scope, store, selector, equality_fn)
}

/// Like [`use_selector_with`], reading the store published under `channel`
pub fn use_selector_in<S, A, T, F, E>(
    scope: &mut Scope<'_>,
    channel: &Context<Store<S, A>>,
    selector: F,
    equality_fn: E,
) -> Result<T>
where
    S: 'static,
    A: Action,
    T: Clone + 'static,
    F: Fn(&S) -> T + 'static,
    E: Fn(&T, &T) -> bool + 'static,
{
    let store = scope
        .context_in(channel)
        .map(|store| store.reader())
        .ok_or(Error::NoStore {
            state: type_name::<S>(),
        })?;
    select(scope, store, selector, equality_fn)
}

fn select<S, T, F, E>(
    scope: &mut Scope<'_>,
    store: StateRef<S>,
    selector: F,
    equality_fn: E,
) -> Result<T>
where
    S: 'static,
    T: Clone + 'static,
    F: Fn(&S) -> T + 'static,
    E: Fn(&T, &T) -> bool + 'static,
{
    let derived = selector(&store.state());
    let handle = scope.render_handle();

    let cell = scope.use_hook(|| SelectorCell::<T> {
        last: Rc::new(RefCell::new(None)),
        subscription: None,
    })?;
    *cell.last.borrow_mut() = Some(derived.clone());

    if cell.subscription.is_none() {
        let last = Rc::clone(&cell.last);
        let weak = store.downgrade();
        cell.subscription = Some(store.subscribe(move || {
            let Some(store) = weak.upgrade() else {
                return;
            };
            let next = selector(&store.state());
            let unchanged = last
                .borrow()
                .as_ref()
                .is_some_and(|previous| equality_fn(&next, previous));
            if !unchanged {
                handle.request_render();
            }
        }));
    }

    Ok(derived)
}
