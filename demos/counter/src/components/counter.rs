use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use slomux::{use_dispatch, use_selector, Dispatch, EventKind, Result, Scope};

use super::Component;
use crate::action::{update_counter, CounterAction};
use crate::state::CounterState;

/// Shows the counter between `-` and `+` buttons
///
/// Re-renders only when `counter` changes.
#[derive(Debug, Default)]
pub struct Counter {
    dispatch: Dispatch<CounterAction>,
}

impl Component for Counter {
    fn render(&mut self, scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()> {
        let counter = use_selector(scope, |state: &CounterState| state.counter)?;
        self.dispatch = use_dispatch(scope);

        let button = Style::default().fg(Color::Cyan).bold();
        let line = Line::from(vec![
            Span::styled("[-]", button),
            Span::raw(format!("  {}  ", counter)),
            Span::styled("[+]", button),
        ]);

        let block = Block::default()
            .title(" Counter ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
        Ok(())
    }

    fn handle_event(&mut self, event: &EventKind) {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('+') | KeyCode::Char('k') | KeyCode::Up => {
                    self.dispatch.call(update_counter(1));
                }
                KeyCode::Char('-') | KeyCode::Char('j') | KeyCode::Down => {
                    self.dispatch.call(update_counter(-1));
                }
                _ => {}
            }
        }
    }

    fn name(&self) -> &'static str {
        "Counter"
    }
}
