//! # AttachmentStrip Component
//!
//! Pending files and URLs, shown above the input box while any are queued.
//!
//! Ctrl+T focuses the strip: ←/→ move the selection, Del or Backspace
//! removes the selected item, Esc hands focus back to the input.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::attachment::Attachment;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::truncate_to_width;
use crate::tui::event::TuiEvent;

/// Bordered single row
pub const STRIP_HEIGHT: u16 = 3;
const MAX_LABEL_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentStripEvent {
    Remove(usize),
    /// Focus goes back to the input box
    Leave,
}

#[derive(Debug, Default)]
pub struct AttachmentStripState {
    pub selected: usize,
    /// Number of items the strip last saw; used to clamp `selected`.
    len: usize,
}

impl AttachmentStripState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the selection on an existing item after the list changes.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

impl EventHandler for AttachmentStripState {
    type Event = AttachmentStripEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorLeft => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                if self.selected + 1 < self.len {
                    self.selected += 1;
                }
                None
            }
            TuiEvent::Delete | TuiEvent::Backspace if self.len > 0 => {
                Some(AttachmentStripEvent::Remove(self.selected))
            }
            TuiEvent::Escape | TuiEvent::FocusAttachments => Some(AttachmentStripEvent::Leave),
            _ => None,
        }
    }
}

pub fn strip_height(attachments: &[Attachment]) -> u16 {
    if attachments.is_empty() { 0 } else { STRIP_HEIGHT }
}

pub struct AttachmentStrip<'a> {
    pub state: &'a AttachmentStripState,
    pub attachments: &'a [Attachment],
    pub focused: bool,
}

impl<'a> AttachmentStrip<'a> {
    pub fn new(state: &'a AttachmentStripState, attachments: &'a [Attachment], focused: bool) -> Self {
        Self {
            state,
            attachments,
            focused,
        }
    }
}

fn chip(attachment: &Attachment) -> String {
    let kind = if attachment.is_file() { "file" } else { "url" };
    format!(" {kind}: {} ", truncate_to_width(attachment.label(), MAX_LABEL_WIDTH))
}

impl Component for AttachmentStrip<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(self.attachments.len() * 2);
        for (i, attachment) in self.attachments.iter().enumerate() {
            let base = if attachment.is_file() {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Black).bg(Color::Magenta)
            };
            let style = if self.focused && i == self.state.selected {
                base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                base
            };
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(chip(attachment), style));
        }

        let title = if self.focused {
            " Attachments (←/→ select · Del remove · Esc back) ".to_string()
        } else {
            format!(" Attachments ({}) ", self.attachments.len())
        };
        let border = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(title);

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
