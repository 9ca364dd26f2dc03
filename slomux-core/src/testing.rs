//! Test utilities for slomux applications
//!
//! - [`char_key`], [`ctrl_key`], [`key_code`]: build `KeyEvent`s
//! - [`key_press`]: wrap a key into an [`EventKind`] for `handle_event`
//! - [`RenderHarness`]: paint a [`Host`] into an in-memory terminal
//! - [`buffer_to_string_plain`]: flatten a buffer for assertions
//!
//! # Example
//!
//! ```ignore
//! use slomux::testing::{char_key, key_press, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 6);
//! let output = render.render_host(&mut host)?;
//! assert!(output.contains("Counter: 1"));
//!
//! host.handle_event(&key_press(char_key('+')));
//! assert!(host.has_pending());
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::error::Result;
use crate::event::EventKind;
use crate::host::Host;

/// Create a `KeyEvent` for a key code with the given modifiers
pub fn key_code(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with no modifiers.
///
/// # Examples
///
/// ```
/// use slomux_core::testing::char_key;
/// use crossterm::event::KeyCode;
///
/// let k = char_key('+');
/// assert_eq!(k.code, KeyCode::Char('+'));
/// ```
pub fn char_key(c: char) -> KeyEvent {
    key_code(KeyCode::Char(c), KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    key_code(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Wrap a `KeyEvent` into the event kind components receive
pub fn key_press(key: KeyEvent) -> EventKind {
    EventKind::Key(key)
}

/// Flatten a buffer into lines of plain text, trailing spaces trimmed
pub fn buffer_to_string_plain(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// In-memory terminal for render tests
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Render with a closure and return the plain-text output
    pub fn render_to_string_plain(&mut self, render: impl FnOnce(&mut Frame)) -> String {
        let completed = self
            .terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("Failed to draw test frame: {}", e));
        buffer_to_string_plain(completed.buffer)
    }

    /// Paint a host and return the plain-text output
    pub fn render_host(&mut self, host: &mut Host) -> Result<String> {
        let mut result = Ok(());
        let output = self.render_to_string_plain(|frame| result = host.draw(frame));
        result.map(|()| output)
    }

    /// The underlying test terminal
    pub fn terminal(&self) -> &Terminal<TestBackend> {
        &self.terminal
    }
}
