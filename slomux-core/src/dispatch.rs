//! Dispatch accessor: the write side of a store, resolved through context

use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::host::Scope;
use crate::store::Store;
use crate::Action;

/// A store's dispatch function, detached from the store handle
///
/// Obtained from [`Store::dispatcher`] or, inside a component, from
/// [`use_dispatch`]. A dispatcher created without a store ([`Dispatch::noop`])
/// drops every action, so components can always call it safely.
pub struct Dispatch<A> {
    target: Option<Rc<dyn Fn(A) -> bool>>,
}

impl<A: Action> Dispatch<A> {
    pub(crate) fn new(target: impl Fn(A) -> bool + 'static) -> Self {
        Self {
            target: Some(Rc::new(target)),
        }
    }

    /// A dispatcher that ignores every action
    pub fn noop() -> Self {
        Self { target: None }
    }

    pub fn is_noop(&self) -> bool {
        self.target.is_none()
    }

    /// Dispatch an action
    ///
    /// Returns `true` if the store's state reference changed.
    pub fn call(&self, action: A) -> bool {
        match &self.target {
            Some(target) => target(action),
            None => {
                tracing::trace!(action = action.name(), "No store in scope, action dropped");
                false
            }
        }
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<A> Default for Dispatch<A> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<A> fmt::Debug for Dispatch<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("noop", &self.target.is_none())
            .finish()
    }
}

/// Resolve the nearest provider's dispatch function
///
/// Falls back to [`Dispatch::noop`] when no provider for `A` is reachable
/// from the component, e.g. before the provider is mounted.
///
/// ```ignore
/// fn render(&mut self, scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()> {
///     self.dispatch = use_dispatch(scope);
///     // ...
/// }
///
/// fn handle_event(&mut self, event: &EventKind) {
///     self.dispatch.call(update_counter(1));
/// }
/// ```
pub fn use_dispatch<A: Action>(scope: &Scope<'_>) -> Dispatch<A> {
    scope.context::<Dispatch<A>>().unwrap_or_default()
}

/// Resolve the dispatch function of the store published under `channel`
pub fn use_dispatch_in<S: 'static, A: Action>(
    scope: &Scope<'_>,
    channel: &Context<Store<S, A>>,
) -> Dispatch<A> {
    scope
        .context_in(channel)
        .map(|store| store.dispatcher())
        .unwrap_or_default()
}
