//! Reducer - pure state transitions
//!
//! Each applicable action yields a new state with exactly one field replaced.
//! Inapplicable actions (uncoercible step text, counter overflow) return the
//! same `Rc`, which the store reports as unchanged.

use std::rc::Rc;

use crate::action::CounterAction;
use crate::state::CounterState;

pub fn reducer(state: &Rc<CounterState>, action: CounterAction) -> Rc<CounterState> {
    match action {
        CounterAction::UpdateCounter(by) => {
            let counter = by
                .checked_mul(state.step_size)
                .and_then(|delta| state.counter.checked_add(delta));
            match counter {
                Some(counter) => Rc::new(CounterState {
                    counter,
                    ..CounterState::clone(state)
                }),
                None => {
                    tracing::warn!(
                        counter = state.counter,
                        step_size = state.step_size,
                        by,
                        "Counter update overflows, ignored"
                    );
                    Rc::clone(state)
                }
            }
        }

        CounterAction::ChangeStepSize(input) => match input.coerce() {
            Some(step_size) => Rc::new(CounterState {
                step_size,
                ..CounterState::clone(state)
            }),
            None => {
                tracing::warn!(input = ?input, "Step size is not a number, ignored");
                Rc::clone(state)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{change_step_size, update_counter};

    fn state(counter: i64, step_size: i64) -> Rc<CounterState> {
        Rc::new(CounterState::new(counter, step_size))
    }

    #[test]
    fn test_update_counter_scales_by_step() {
        let next = reducer(&state(1, 1), update_counter(1));
        assert_eq!(*next, CounterState::new(2, 1));

        let next = reducer(&state(2, 3), update_counter(-1));
        assert_eq!(*next, CounterState::new(-1, 3));
    }

    #[test]
    fn test_change_step_size_coerces_text() {
        let next = reducer(&state(2, 1), change_step_size("3"));
        assert_eq!(*next, CounterState::new(2, 3));

        let next = reducer(&state(2, 1), change_step_size(""));
        assert_eq!(*next, CounterState::new(2, 0));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let before = state(1, 1);
        let next = reducer(&before, update_counter(5));
        assert_eq!(*before, CounterState::new(1, 1));
        assert!(!Rc::ptr_eq(&before, &next));
    }

    #[test]
    fn test_bad_step_text_keeps_identity() {
        let before = state(1, 2);
        let next = reducer(&before, change_step_size("fast"));
        assert!(Rc::ptr_eq(&before, &next));
    }

    #[test]
    fn test_overflow_keeps_identity() {
        let before = state(i64::MAX, 1);
        let next = reducer(&before, update_counter(1));
        assert!(Rc::ptr_eq(&before, &next));

        let before = state(0, i64::MAX);
        let next = reducer(&before, update_counter(2));
        assert!(Rc::ptr_eq(&before, &next));
    }
}
