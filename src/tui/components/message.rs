use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::message::{Message, MessageKind, Sender};
use crate::tui::component::Component;
use crate::tui::components::ad_copy_card::AdCopyCard;
use crate::tui::components::input_box::layout::wrapped_lines;
use crate::tui::components::product_grid::ProductGrid;
use crate::tui::components::row_count;

/// Horizontal padding (per side) between the border and content.
const CONTENT_PAD_H: u16 = 1;
/// Borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Blank row between the text and a structured body.
const BODY_GAP: u16 = 1;

/// One transcript entry.
///
/// Transient: built each frame by `MessageList` for the visible range. The
/// block title carries the sender and `HH:MM`; the text sits on top and a
/// structured reply (product grid or ad copy) is drawn underneath it.
///
/// # Height Calculation
///
/// Text is wrapped with `textwrap` before rendering, and the structured bodies
/// report their own heights, so [`calculate_height`](Self::calculate_height)
/// is exact and the list can lay out without drawing.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        text_rows(message, content_width)
            .saturating_add(body_rows(message, content_width))
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn text_lines(message: &Message, content_width: u16) -> Vec<String> {
    let text = message.text.trim();
    if text.is_empty() {
        Vec::new()
    } else {
        wrapped_lines(text, content_width)
    }
}

fn text_rows(message: &Message, content_width: u16) -> u16 {
    row_count(text_lines(message, content_width).len())
}

/// Rows taken by the structured body, including the gap above it.
fn body_rows(message: &Message, content_width: u16) -> u16 {
    let gap = if message.text.trim().is_empty() { 0 } else { BODY_GAP };
    match &message.kind {
        MessageKind::Text => 0,
        MessageKind::SearchResults(products) if products.is_empty() => 0,
        MessageKind::SearchResults(products) => {
            gap.saturating_add(ProductGrid::calculate_height(products, content_width))
        }
        MessageKind::MarketingCopy(copy) => {
            gap.saturating_add(AdCopyCard::calculate_height(copy, content_width))
        }
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Assistant => Style::default().fg(Color::Blue),
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = self.message;
        let name = match message.sender {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        };
        let style = sender_style(message.sender);

        let block = Block::bordered()
            .title(format!(" {name} · {} ", message.formatted_time()))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = text_lines(message, inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        let text_height = (lines.len() as u16).min(inner.height);
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(Rect { height: text_height, ..inner }, buf);

        let body_height = body_rows(message, inner.width);
        if body_height == 0 {
            return;
        }
        let gap = if text_height == 0 { 0 } else { BODY_GAP };
        let body = Rect {
            y: inner.y + text_height + gap,
            height: inner.height.saturating_sub(text_height + gap),
            ..inner
        };
        match &message.kind {
            MessageKind::SearchResults(products) => ProductGrid::new(products).render(body, buf),
            MessageKind::MarketingCopy(copy) => AdCopyCard::new(copy).render(body, buf),
            MessageKind::Text => {}
        }
    }
}

impl Component for MessageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
