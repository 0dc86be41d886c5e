//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display the list of messages, oldest first
//! - Show the typing indicator while a request is in flight
//! - Keep the newest message in view unless the user has scrolled away
//! - Cache message heights so only new entries are measured
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).
//! `Component::render` takes `&mut self`, so the layout cache and scroll state
//! are updated during the render pass.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;

/// Bordered one-line block
pub const INDICATOR_HEIGHT: u16 = 3;

/// Layout and scroll state for the message list.
/// Persisted in the parent `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Rows drawn after the last message (typing indicator)
    trailing_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            trailing_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_add(self.trailing_height)
            .saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Clamp scroll and re-engage auto-scroll once the user is back at the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let messages = self.transcript.messages();

        // 1. Measure anything the cache doesn't already cover
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(reusable) {
            layout.heights.push(MessageView::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(messages.len(), content_width);

        let total_height = self.state.layout.total_height();
        self.state.trailing_height = if self.is_loading { INDICATOR_HEIGHT } else { 0 };
        let canvas_height = total_height.saturating_add(self.state.trailing_height);

        // 2. Settle the offset before picking the visible range
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render the visible messages into the canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = self.state.layout.top_of(visible.start);
        for i in visible {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(MessageView::new(&messages[i]), rect);
            y = y.saturating_add(height);
        }

        if self.is_loading {
            let rect = Rect::new(0, total_height, content_width, INDICATOR_HEIGHT);
            scroll_view.render_widget(TypingIndicator { frame: self.spinner_frame }, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Three dots that light up in turn.
struct TypingIndicator {
    frame: usize,
}

impl TypingIndicator {
    fn dots(frame: usize) -> String {
        let lit = frame % 3;
        (0..3)
            .map(|i| if i == lit { "●" } else { "·" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::Blue);
        let block = Block::bordered()
            .title(" Assistant ")
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(1));
        Paragraph::new(Line::styled(Self::dots(self.frame), style))
            .block(block)
            .render(area, buf);
    }
}

/// `MessageList` is rebuilt every frame, so scroll handling lives on the
/// persistent state instead.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements.
///
/// Messages never change once pushed, so heights stay valid until the width
/// changes or the transcript shrinks.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where message `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or_else(|| self.total_height()),
        }
    }

    /// Messages overlapping the viewport, plus half a screen either side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self.prefix_heights.partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
