//! Application state - single source of truth
//!
//! Held by the store as `Rc<CounterState>`. The reducer replaces it wholesale;
//! components read it only through selectors.

/// Smallest step the Step slider offers
pub const MIN_STEP: i64 = 1;
/// Largest step the Step slider offers
pub const MAX_STEP: i64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterState {
    pub counter: i64,
    /// Amount one `UPDATE_COUNTER` unit moves the counter
    pub step_size: i64,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            counter: 1,
            step_size: 1,
        }
    }
}

impl CounterState {
    pub fn new(counter: i64, step_size: i64) -> Self {
        Self { counter, step_size }
    }
}
