use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::row_count;

const NOTICE_WIDTH: u16 = 60;

/// Blocking notice for a rejected attachment. While one is showing, every
/// key except Esc/Enter (dismiss) and Ctrl+C is swallowed.
pub struct Notice<'a> {
    pub message: &'a str,
    /// Notices still queued behind this one
    pub remaining: usize,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str, remaining: usize) -> Self {
        Self { message, remaining }
    }

    fn height(&self, width: u16) -> u16 {
        // borders + padding row above and below + hint line
        let inner = width.saturating_sub(4).max(1) as usize;
        row_count(textwrap::wrap(self.message, inner).len().max(1)).saturating_add(5)
    }
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = NOTICE_WIDTH.min(area.width);
        let overlay = super::centered_rect(width, self.height(width), area);
        frame.render_widget(Clear, overlay);

        let title = if self.remaining > 0 {
            format!(" Attachment rejected (+{} more) ", self.remaining)
        } else {
            " Attachment rejected ".to_string()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(title)
            .padding(Padding::uniform(1));

        let lines = vec![
            Line::styled(self.message, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled("Press Esc or Enter to dismiss", Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            overlay,
        );
    }
}
