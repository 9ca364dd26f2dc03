//! Context bridge: publish values to a component subtree
//!
//! A [`Provider`] mounted in a [`Host`](crate::Host) makes its store
//! discoverable to every descendant without threading it through props.
//! Lookups walk from a component up through its ancestors and take the
//! nearest match, so nested providers shadow outer ones only inside their own
//! subtree and independent trees never see each other's stores.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::Store;
use crate::Action;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a context channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

/// A typed context channel
///
/// Values published under a channel are found only by lookups naming the
/// same channel. Use one to pick a specific provider when several provide
/// the same types.
pub struct Context<T> {
    id: ContextId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Context<T> {
    /// A fresh channel, distinct from every other
    pub fn new() -> Self {
        Self {
            id: ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)),
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Context<T> {}

impl<T> PartialEq for Context<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Context<T> {}

impl<T> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context").field(&self.id.0).finish()
    }
}

/// Values published on one node of the component tree
#[derive(Default)]
pub struct Contexts {
    by_type: HashMap<TypeId, Box<dyn Any>>,
    by_channel: HashMap<ContextId, Box<dyn Any>>,
}

impl Contexts {
    /// Publish `value`, found by lookups for its type
    pub fn insert<T: 'static>(&mut self, value: T) {
        self.by_type.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Publish `value` under `channel`
    pub fn insert_in<T: 'static>(&mut self, channel: &Context<T>, value: T) {
        self.by_channel.insert(channel.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.by_type
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    pub fn get_in<T: 'static>(&self, channel: &Context<T>) -> Option<&T> {
        self.by_channel
            .get(&channel.id)
            .and_then(|value| value.downcast_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty() && self.by_channel.is_empty()
    }
}

impl fmt::Debug for Contexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contexts")
            .field("types", &self.by_type.len())
            .field("channels", &self.by_channel.len())
            .finish()
    }
}

/// Something that publishes values onto a tree node when mounted
pub trait ContextProvider {
    fn provide(&self, contexts: &mut Contexts);
}

/// Makes a store available to the subtree it is mounted on
///
/// Publishes the store under its channel, plus its [`StateRef`](crate::StateRef)
/// and [`Dispatch`](crate::Dispatch) by type.
///
/// ```ignore
/// let store = Store::new(CounterState::default(), reducer);
/// let mut host = Host::new();
/// let root = host.provide(None, Provider::new(store))?;
/// host.mount(Some(root), Counter::default(), area)?;
/// ```
pub struct Provider<S, A: Action> {
    store: Store<S, A>,
    channel: Context<Store<S, A>>,
}

impl<S: 'static, A: Action> Provider<S, A> {
    /// Provide `store` on a freshly created channel
    pub fn new(store: Store<S, A>) -> Self {
        Self::with_context(store, Context::new())
    }

    /// Provide `store` on an existing channel
    pub fn with_context(store: Store<S, A>, channel: Context<Store<S, A>>) -> Self {
        Self { store, channel }
    }

    pub fn channel(&self) -> Context<Store<S, A>> {
        self.channel
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }
}

impl<S: 'static, A: Action> ContextProvider for Provider<S, A> {
    fn provide(&self, contexts: &mut Contexts) {
        contexts.insert_in(&self.channel, self.store.clone());
        contexts.insert(self.store.reader());
        contexts.insert(self.store.dispatcher());
    }
}

impl<S: 'static, A: Action> fmt::Debug for Provider<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("store", &self.store)
            .field("channel", &self.channel)
            .finish()
    }
}
