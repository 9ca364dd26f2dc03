//! slomux: a single store with selector hooks for Rust TUI component trees
//!
//! One store holds the state, a pure reducer turns actions into new state,
//! and components read derived slices through `use_selector`. A component is
//! re-rendered only when its selected slice changes.
//!
//! # Example
//! ```ignore
//! use slomux::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum CounterAction {
//!     UpdateCounter(i64),
//!     ChangeStepSize(i64),
//! }
//!
//! let store = Store::new(CounterState::default(), reducer);
//! let mut host = Host::new();
//! let root = host.provide(None, Provider::new(store.clone()))?;
//! host.mount(Some(root), Counter::default(), area)?;
//! ```

// Re-export everything from core
pub use slomux_core::*;

// Re-export derive macros
pub use slomux_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use slomux_core::{Action, Component, ContextProvider};

    // Store and context
    pub use slomux_core::{
        Context, Dispatch, Provider, Reducer, StateRef, Store, StoreConfig, Subscription,
    };

    // Hooks
    pub use slomux_core::{
        equality, use_dispatch, use_dispatch_in, use_selector, use_selector_in, use_selector_with,
    };

    // Host and events
    pub use slomux_core::{
        process_raw_event, spawn_event_poller, EventKind, Host, InstanceId, PollerConfig,
        RawEvent, Scope,
    };

    // Errors
    pub use slomux_core::{Error, Result};

    // Derive macros
    pub use slomux_macros::Action;

    // Ratatui re-exports
    pub use slomux_core::{Buffer, Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
