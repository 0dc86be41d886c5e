//! # TUI Components
//!
//! Every widget the chat screen is built from.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from the data they display:
//! - `TitleBar`: service name, status line and backend URL
//! - `ErrorBanner`: the dismissible error under the title bar
//! - `MessageView`: one conversation entry, delegating to `ProductGrid` or
//!   `AdCopyCard` for structured replies
//! - `AttachmentStrip`: the pending files and URLs
//! - `Notice`: centered overlay for a rejected attachment
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state across frames and emit events:
//! - `InputBox`: message composer
//! - `MessageList`: scrollable transcript with layout caching
//! - `Prompt`: single-line file path / URL entry
//!
//! Components receive what they show as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! TitleBar::new(app.status_message.clone(), app.base_url.clone(), scrolled_up).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file, shared helpers)
//! ├── title_bar.rs
//! ├── error_banner.rs
//! ├── message.rs           (single transcript entry)
//! ├── product_grid.rs      (search result cards)
//! ├── ad_copy_card.rs      (marketing copy)
//! ├── message_list.rs      (scroll container)
//! ├── attachment_strip.rs
//! ├── prompt.rs
//! ├── notice.rs
//! └── input_box/
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod ad_copy_card;
pub mod attachment_strip;
pub mod error_banner;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod notice;
pub mod product_grid;
pub mod prompt;
mod title_bar;

pub use attachment_strip::{AttachmentStrip, AttachmentStripEvent, AttachmentStripState};
pub use error_banner::ErrorBanner;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use notice::Notice;
pub use prompt::{Prompt, PromptEvent, PromptKind};
pub use title_bar::TitleBar;

/// Cuts `s` to at most `max_width` display columns, ending in `...` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Converts a line count to rows, saturating at `u16::MAX`.
pub fn row_count(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// A rect of `width` x `height` centered in `outer`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}
