use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use slomux::{use_dispatch, use_selector_with, Dispatch, EventKind, Result, Scope};

use super::Component;
use crate::action::{change_step_size, CounterAction};
use crate::state::{CounterState, MAX_STEP, MIN_STEP};

/// Step size slider
///
/// Re-renders only when `step_size` changes. Left/Right (or h/l) move the
/// slider within `MIN_STEP..=MAX_STEP`; digit keys jump to that position.
#[derive(Debug)]
pub struct Step {
    dispatch: Dispatch<CounterAction>,
    step_size: i64,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            dispatch: Dispatch::noop(),
            step_size: MIN_STEP,
        }
    }
}

impl Step {
    fn slider(step_size: i64) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!("{} ", MIN_STEP),
            Style::default().fg(Color::DarkGray),
        )];
        for position in MIN_STEP..=MAX_STEP {
            if position == step_size {
                spans.push(Span::styled("●", Style::default().fg(Color::Yellow).bold()));
            } else {
                spans.push(Span::styled("─", Style::default().fg(Color::DarkGray)));
            }
            if position < MAX_STEP {
                spans.push(Span::styled("──", Style::default().fg(Color::DarkGray)));
            }
        }
        spans.push(Span::styled(
            format!(" {}", MAX_STEP),
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }

    fn nudge(&self, by: i64) {
        let next = (self.step_size + by).clamp(MIN_STEP, MAX_STEP);
        if next != self.step_size {
            self.dispatch.call(change_step_size(next));
        }
    }
}

impl Component for Step {
    fn render(&mut self, scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()> {
        self.step_size = use_selector_with(
            scope,
            |state: &CounterState| state.step_size,
            |current, prev| current == prev,
        )?;
        self.dispatch = use_dispatch(scope);

        let lines = vec![
            Line::from("The counter moves by the step size on each press"),
            Line::from(vec![
                Span::raw("Step size: "),
                Span::styled(self.step_size.to_string(), Style::default().bold()),
            ]),
            Self::slider(self.step_size),
        ];

        let block = Block::default()
            .title(" Step ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        Paragraph::new(lines).block(block).render(area, buf);
        Ok(())
    }

    fn handle_event(&mut self, event: &EventKind) {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.nudge(-1),
                KeyCode::Right | KeyCode::Char('l') => self.nudge(1),
                KeyCode::Char(c @ '1'..='5') => {
                    // Slider positions arrive as text, like a form input value
                    self.dispatch.call(change_step_size(c.to_string()));
                }
                _ => {}
            }
        }
    }

    fn name(&self) -> &'static str {
        "Step"
    }
}
