use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// One-line red banner for the last failed request. Drawn only while
/// `App::error` is set; Esc clears it.
pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for ErrorBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::White).bg(Color::Red);
        let line = Line::from(vec![
            Span::styled(" ✗ ", style.add_modifier(Modifier::BOLD)),
            Span::styled(self.message, style),
            Span::styled("  (Esc to dismiss) ", style.add_modifier(Modifier::DIM)),
        ])
        .style(style);
        frame.render_widget(line, area);
    }
}
