//! Text buffer with a byte-offset cursor, shared by the message input and
//! the attachment prompt.

use crate::tui::event::TuiEvent;

#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pos: usize,
    /// When set, newlines (typed or pasted) become spaces.
    single_line: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_line() -> Self {
        Self {
            single_line: true,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.clear();
        self.pos = 0;
        self.insert_str(text);
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        self.pos = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn insert_str(&mut self, text: &str) {
        let text = if self.single_line {
            text.replace(['\r', '\n'], " ")
        } else {
            text.replace("\r\n", "\n")
        };
        self.buffer.insert_str(self.pos, &text);
        self.pos += text.len();
    }

    /// Applies an editing event. Returns `true` if the buffer or cursor changed.
    pub fn apply(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::InputChar(c) => {
                let c = if self.single_line && *c == '\n' { ' ' } else { *c };
                self.buffer.insert(self.pos, c);
                self.pos += c.len_utf8();
                true
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                true
            }
            TuiEvent::Backspace if self.pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                true
            }
            TuiEvent::Delete if self.pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                true
            }
            TuiEvent::CursorLeft if self.pos > 0 => {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                true
            }
            TuiEvent::CursorRight if self.pos < self.buffer.len() => {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                true
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.pos].rfind('\n').map_or(0, |i| i + 1);
                let moved = self.pos != line_start;
                self.pos = line_start;
                moved
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.pos + i);
                let moved = self.pos != line_end;
                self.pos = line_end;
                moved
            }
            _ => false,
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(text.len(), |c| pos + c.len_utf8())
}
