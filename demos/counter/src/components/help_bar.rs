use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use slomux::{Result, Scope};

use super::Component;

/// Key hints; reads no state, so it is activated once
pub struct HelpBar;

impl Component for HelpBar {
    fn render(&mut self, _scope: &mut Scope<'_>, area: Rect, buf: &mut Buffer) -> Result<()> {
        let key = Style::default().fg(Color::Cyan).bold();
        let hint = Style::default().fg(Color::DarkGray);
        let help = Line::from(vec![
            Span::styled(" +/-", key),
            Span::styled(" counter  ", hint),
            Span::styled("←/→", key),
            Span::styled(" step  ", hint),
            Span::styled("1-5", key),
            Span::styled(" set step  ", hint),
            Span::styled("q", key),
            Span::styled(" quit ", hint),
        ])
        .centered();
        Paragraph::new(help).render(area, buf);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HelpBar"
    }
}
