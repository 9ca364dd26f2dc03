//! Core traits and types for slomux
//!
//! This crate provides a single-store, unidirectional state core for
//! component trees rendered with ratatui, following a Redux-inspired
//! architecture with selector hooks.
//!
//! # Core Concepts
//!
//! - **Action**: Tagged values that describe state transitions
//! - **Store**: State container with a pure reducer and change listeners
//! - **Provider**: Publishes a store to a component subtree
//! - **Hooks**: `use_selector` reads derived state, `use_dispatch` writes
//! - **Host**: Mounts components, keeps their hook state, re-renders only
//!   the components whose selected values changed
//!
//! # Basic Example
//!
//! ```ignore
//! use slomux_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum CounterAction {
//!     UpdateCounter(i64),
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     counter: i64,
//! }
//!
//! fn reducer(state: &Rc<CounterState>, action: CounterAction) -> Rc<CounterState> {
//!     match action {
//!         CounterAction::UpdateCounter(by) => Rc::new(CounterState {
//!             counter: state.counter + by,
//!         }),
//!     }
//! }
//!
//! let store = Store::new(CounterState::default(), reducer);
//! let mut host = Host::new();
//! let root = host.provide(None, Provider::new(store.clone()))?;
//! let counter = host.mount(Some(root), Counter::default(), area)?;
//!
//! host.render(&mut buf)?;                         // first activation subscribes
//! store.dispatch(CounterAction::UpdateCounter(1)); // listener requests re-render
//! assert!(host.has_pending());
//! host.render(&mut buf)?;                         // only `counter` re-renders
//! ```
//!
//! # Data Flow
//!
//! 1. A component reads state with `use_selector` during `render`
//! 2. An event handler passes an action to the `Dispatch` from `use_dispatch`
//! 3. The store runs the reducer, replaces the state, notifies listeners
//! 4. Each selector listener compares its new value with the last rendered
//!    one and requests a re-render only if they differ
//! 5. The next `Host::render` re-activates just those components

pub mod action;
pub mod component;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod host;
mod listener;
pub mod selector;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;
pub use error::{Error, Result};

// Store exports
pub use listener::{ListenerId, Subscription};
pub use store::{Reducer, StateRef, Store, StoreConfig, WeakStateRef};

// Context and hook exports
pub use context::{Context, ContextId, ContextProvider, Contexts, Provider};
pub use dispatch::{use_dispatch, use_dispatch_in, Dispatch};
pub use selector::{equality, use_selector, use_selector_in, use_selector_with};

// Host exports
pub use event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
pub use host::{Host, InstanceId, RenderHandle, Scope};

// Re-export ratatui types for convenience
pub use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::context::{Context, ContextProvider, Provider};
    pub use crate::dispatch::{use_dispatch, use_dispatch_in, Dispatch};
    pub use crate::error::{Error, Result};
    pub use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
    pub use crate::host::{Host, InstanceId, Scope};
    pub use crate::selector::{equality, use_selector, use_selector_in, use_selector_with};
    pub use crate::store::{Reducer, StateRef, Store, StoreConfig};
    pub use crate::Subscription;

    // Re-export ratatui types
    pub use ratatui::{
        buffer::Buffer,
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
