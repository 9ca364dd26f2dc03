//! Component trait for UI elements hosted in a [`Host`](crate::Host)

use ratatui::{buffer::Buffer, layout::Rect};

use crate::error::Result;
use crate::event::EventKind;
use crate::host::Scope;

/// A UI element that reads shared state through hooks and paints its area
///
/// Components follow these rules:
/// 1. Shared state is read only through hooks (`use_selector`) on `scope`
/// 2. Shared state changes only through a dispatcher (`use_dispatch`)
/// 3. `render` paints `area` of `buf` and nothing else
///
/// `render` is an *activation*: the host calls it on mount and again only
/// when one of the component's selectors reported a changed value (or its
/// area changed). Between activations the host reuses the last painted
/// output. Hooks must be called in the same order on every activation.
///
/// Local UI state (the last dispatcher, a cached value for event handling)
/// can live in `&mut self`.
///
/// # Example
///
/// ```ignore
/// use slomux::prelude::*;
///
/// #[derive(Default)]
/// struct Counter {
///     dispatch: Dispatch<CounterAction>,
/// }
///
/// impl Component for Counter {
///     fn render(&mut self, scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()> {
///         let counter = use_selector(scope, |s: &CounterState| s.counter)?;
///         self.dispatch = use_dispatch(scope);
///         Paragraph::new(counter.to_string()).render(area, buf);
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: &EventKind) {
///         if let EventKind::Key(key) = event {
///             if key.code == KeyCode::Char('+') {
///                 self.dispatch.call(update_counter(1));
///             }
///         }
///     }
/// }
/// ```
pub trait Component: 'static {
    /// Paint the component, running its hooks
    fn render(&mut self, scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()>;

    /// React to an input event
    ///
    /// Default implementation ignores events (render-only components).
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &EventKind) {}

    /// Name used in log events
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
