//! # Prompt Component
//!
//! Single-line overlay for attaching a file by path (Ctrl+F) or a URL
//! (Ctrl+U). The prompt only collects text; validation happens in the
//! caller, which decides whether the prompt closes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::components::input_box::LineEditor;
use crate::tui::event::TuiEvent;

const PROMPT_WIDTH: u16 = 72;
const PROMPT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    File,
    Url,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::File => " Attach file: path (Enter attach · Esc cancel) ",
            PromptKind::Url => " Attach URL (Enter add · Esc cancel) ",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            PromptKind::File => "~/Documents/brief.pdf",
            PromptKind::Url => "https://example.com/product",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// Enter with non-blank input; carries the trimmed text.
    Submit(String),
    Cancel,
}

pub struct Prompt {
    pub kind: PromptKind,
    editor: LineEditor,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            editor: LineEditor::single_line(),
        }
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }
}

impl EventHandler for Prompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            TuiEvent::Submit => {
                let value = self.editor.text().trim();
                (!value.is_empty()).then(|| PromptEvent::Submit(value.to_string()))
            }
            other => {
                self.editor.apply(other);
                None
            }
        }
    }
}

impl Component for Prompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(self.kind.title())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);

        // keep the tail (and the cursor) visible for long paths
        let before_cursor = &self.editor.text()[..self.editor.cursor()];
        let cursor_col = before_cursor.width() as u16;
        let skip = cursor_col.saturating_sub(inner.width.saturating_sub(1));

        let paragraph = if self.editor.text().is_empty() {
            Paragraph::new(self.kind.placeholder()).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.editor.text()).scroll((0, skip))
        };
        frame.render_widget(paragraph.block(block), overlay);
        frame.set_cursor_position((inner.x + cursor_col - skip, inner.y));
    }
}
