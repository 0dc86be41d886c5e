//! # InputBox Component
//!
//! The message composer.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, cursor movement)
//! - Decide whether Enter is a valid submit
//! - Clear itself after submitting
//!
//! ## Props
//!
//! - `disabled`: a send is in flight; typing still works but Enter does nothing
//! - `has_attachments`: lets an empty message submit when files/URLs are queued

mod editor;
pub mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub use editor::LineEditor;
use layout::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, content_origin, cursor_row_col, inner_width,
    scroll_for_cursor, wrapped_lines,
};

const PLACEHOLDER: &str = "Ask about products, get marketing copy, or search marketplaces...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with something to send. Carries the trimmed text (may be empty).
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    editor: LineEditor,
    pub disabled: bool,
    pub has_attachments: bool,
    /// Whether the cursor should be drawn (false while another field has focus)
    pub focused: bool,
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            editor: LineEditor::new(),
            disabled: false,
            has_attachments: false,
            focused: true,
            scroll_offset: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Height for the current content, clamped to `MAX_VISIBLE_LINES` rows.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let lines = wrapped_lines(self.editor.text(), inner_width(outer_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Mirrors the send button: disabled while loading or when there is nothing to send.
    pub fn can_submit(&self) -> bool {
        !self.disabled && (!self.editor.is_blank() || self.has_attachments)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let lines = wrapped_lines(self.editor.text(), width);
        let (cursor_row, cursor_col) = cursor_row_col(self.editor.text(), self.editor.cursor(), width);
        self.scroll_offset = scroll_for_cursor(self.scroll_offset, cursor_row, MAX_VISIBLE_LINES);

        let title = if self.disabled {
            " Waiting for assistant... "
        } else {
            " Message (Enter send · Ctrl+J newline · Ctrl+F file · Ctrl+U url · Ctrl+T attachments) "
        };
        let border_color = if self.disabled { Color::DarkGray } else { Color::Blue };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .padding(Padding::horizontal(1));

        let paragraph = if self.editor.text().is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            let start = self.scroll_offset as usize;
            let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
            Paragraph::new(lines[start..end].join("\n")).style(Style::default().fg(Color::White))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let (x, y) = content_origin(area.x, area.y);
            let row = cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x + cursor_col.min(width), y + row));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit => {
                if !self.can_submit() {
                    return None;
                }
                let text = self.editor.take().trim().to_string();
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            other => self.editor.apply(other).then_some(InputEvent::ContentChanged),
        }
    }
}
