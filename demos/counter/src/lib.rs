//! Counter demo for slomux
//!
//! Two components share one store:
//! - `Step` selects the step size with an explicit comparator
//! - `Counter` selects the counter with the default equality
//!
//! Changing the counter never re-renders `Step`, and vice versa.

pub mod action;
pub mod components;
pub mod reducer;
pub mod script;
pub mod state;
