//! Action trait for tagged state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a [`Store`](crate::Store)
///
/// Actions describe an intended state transition. They should be:
/// - Clone: Actions may be logged or replayed
/// - Debug: For debugging and logging
///
/// Stores are single-threaded, so actions need not be `Send`.
///
/// Use `#[derive(Action)]` from `slomux-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + 'static {
    /// The action's type tag, e.g. `"UPDATE_COUNTER"`
    fn name(&self) -> &'static str;
}

