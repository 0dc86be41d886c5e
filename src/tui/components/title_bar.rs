//! # TitleBar Component
//!
//! Top status line.
//!
//! ## Responsibilities
//!
//! - Name the application
//! - Show the service status from the startup health check
//! - Show "↓ New" when the transcript is scrolled away from the bottom
//! - Show which backend the client is talking to (right-aligned)
//!
//! Purely presentational: every field is a prop filled from `App` or
//! `TuiState` each frame.
//!
//! ## Conditional Formatting
//!
//! 1. **Scrolled up**: `"Blue Marketplace Assistant | Service online | ↓ New"`
//! 2. **Status message**: `"Blue Marketplace Assistant | Service online"`
//! 3. **Default**: `"Blue Marketplace Assistant"`

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const APP_NAME: &str = "Blue Marketplace Assistant";

pub struct TitleBar {
    pub status_message: String,
    pub base_url: String,
    /// Content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(status_message: String, base_url: String, has_unseen_content: bool) -> Self {
        Self {
            status_message,
            base_url,
            has_unseen_content,
        }
    }

    fn status_color(&self) -> Color {
        if self.status_message.starts_with("Service online") {
            Color::Green
        } else if self.status_message.starts_with("Checking") {
            Color::Yellow
        } else {
            Color::Red
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let url_width = (self.base_url.chars().count() as u16).min(area.width / 3);
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(url_width)]).areas(area);

        let mut spans = vec![Span::styled(
            APP_NAME,
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(self.status_color()),
            ));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", Style::default().fg(Color::Yellow)));
        }
        frame.render_widget(Line::from(spans), left);

        frame.render_widget(
            Line::styled(self.base_url.as_str(), Style::default().fg(Color::DarkGray)).right_aligned(),
            right,
        );
    }
}
