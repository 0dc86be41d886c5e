//! # AdCopyCard
//!
//! Generated marketing copy, one labelled section per field. Lines are wrapped
//! up front so `calculate_height` and `render` agree exactly.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::api::MarketingCopy;
use crate::tui::components::input_box::layout::wrapped_lines;
use crate::tui::components::row_count;

/// Borders (2) + horizontal padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;
const BULLET: &str = "• ";

pub struct AdCopyCard<'a> {
    pub copy: &'a MarketingCopy,
}

impl<'a> AdCopyCard<'a> {
    pub fn new(copy: &'a MarketingCopy) -> Self {
        Self { copy }
    }

    pub fn calculate_height(copy: &MarketingCopy, width: u16) -> u16 {
        row_count(body_lines(copy, width.saturating_sub(HORIZONTAL_OVERHEAD)).len())
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )
}

/// Wraps `text` under a hanging `prefix`, continuation lines indented to match.
fn hanging(prefix: &str, text: &str, width: u16, style: Style) -> Vec<Line<'static>> {
    let indent = " ".repeat(prefix.chars().count());
    let inner = width.saturating_sub(indent.len() as u16).max(1);
    wrapped_lines(text, inner)
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            let lead = if i == 0 { prefix.to_string() } else { indent.clone() };
            Line::from(vec![Span::raw(lead), Span::styled(segment, style)])
        })
        .collect()
}

fn body_lines(copy: &MarketingCopy, width: u16) -> Vec<Line<'static>> {
    let plain = Style::default();
    let mut lines = Vec::new();

    lines.push(heading("Headlines"));
    for headline in &copy.headlines {
        lines.extend(hanging(BULLET, headline, width, plain.add_modifier(Modifier::BOLD)));
    }

    lines.push(Line::default());
    lines.push(heading("Descriptions"));
    for description in &copy.descriptions {
        lines.extend(hanging(BULLET, description, width, plain));
    }

    if let Some(cta) = &copy.call_to_action {
        lines.push(Line::default());
        lines.push(heading("Call to Action"));
        lines.extend(hanging("", cta, width, Style::default().fg(Color::Green)));
    }

    if let Some(segments) = &copy.target_segments
        && !segments.is_empty()
    {
        lines.push(Line::default());
        lines.push(heading("Target Segments"));
        let tags = segments
            .iter()
            .map(|s| format!("[{s}]"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.extend(hanging("", &tags, width, Style::default().fg(Color::Cyan)));
    }

    lines
}

impl Widget for AdCopyCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(body_lines(self.copy, inner.width)).render(inner, buf);
    }
}
