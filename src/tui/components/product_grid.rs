//! # Product Grid
//!
//! Search results as a grid of fixed-height cards. The column count follows
//! the available width so narrow terminals get a single column.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::api::Product;
use crate::tui::components::{row_count, truncate_to_width};

/// Borders (2) + title, price, link
pub const CARD_HEIGHT: u16 = 5;
/// Narrowest a card gets before the grid drops a column.
pub const MIN_CARD_WIDTH: u16 = 28;

/// `en-US` currency style: `$1,234.50`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (price.abs() * 100.0).round() as u64;
    let (dollars, cents) = (cents / 100, cents % 100);

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if price < 0.0 && (dollars > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}

pub fn columns(width: u16) -> u16 {
    (width / MIN_CARD_WIDTH).max(1)
}

pub struct ProductGrid<'a> {
    pub products: &'a [Product],
}

impl<'a> ProductGrid<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self { products }
    }

    pub fn calculate_height(products: &[Product], width: u16) -> u16 {
        let cols = columns(width) as usize;
        row_count(products.len().div_ceil(cols)).saturating_mul(CARD_HEIGHT)
    }
}

impl Widget for ProductGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = columns(area.width);
        let card_width = area.width / cols;
        let bottom = area.bottom() as usize;

        for (i, product) in self.products.iter().enumerate() {
            let (row, col) = (i / cols as usize, i % cols as usize);
            let y = area.y as usize + row * CARD_HEIGHT as usize;
            if y + CARD_HEIGHT as usize > bottom {
                break;
            }
            let x = area.x + col as u16 * card_width;
            let card = Rect::new(x, y as u16, card_width, CARD_HEIGHT);
            ProductCard { product }.render(card, buf);
        }
    }
}

struct ProductCard<'a> {
    product: &'a Product,
}

impl Widget for ProductCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let lines = vec![
            Line::styled(
                truncate_to_width(&self.product.title, width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format_price(self.product.price),
                Style::default().fg(Color::Green),
            ),
            Line::styled(
                truncate_to_width(&format!("View Product → {}", self.product.link), width),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
