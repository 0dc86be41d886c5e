//! Wrapping and cursor placement for bordered text fields.

/// Borders (2) + horizontal padding (2)
pub const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the field scrolls internally
pub const MAX_VISIBLE_LINES: u16 = 5;
/// Border + left padding
const CONTENT_OFFSET_X: u16 = 2;
const CONTENT_OFFSET_Y: u16 = 1;

pub fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wraps each logical line separately so blank lines survive.
pub fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    let options = wrap_options(width);
    let mut lines = Vec::new();
    for logical in text.split('\n') {
        if logical.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(textwrap::wrap(logical, &options).into_iter().map(|l| l.into_owned()));
        }
    }
    lines
}

/// Row and column of byte offset `pos` within the wrapped text.
pub fn cursor_row_col(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let before = &text[..pos];
    let rows = wrapped_lines(before, width);
    let row = rows.len().saturating_sub(1) as u16;

    // textwrap drops trailing spaces, so count chars on the logical line instead
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let logical = &before[line_start..];
    let segments = wrapped_lines(logical, width);
    let consumed: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|s| s.chars().count())
        .sum();
    let col = logical.chars().count().saturating_sub(consumed) as u16;

    (row, col)
}

/// First visible row so that `cursor_row` stays inside a `visible`-row window.
pub fn scroll_for_cursor(current: u16, cursor_row: u16, visible: u16) -> u16 {
    if cursor_row < current {
        cursor_row
    } else if cursor_row >= current + visible {
        cursor_row + 1 - visible
    } else {
        current
    }
}

pub fn content_origin(area_x: u16, area_y: u16) -> (u16, u16) {
    (area_x + CONTENT_OFFSET_X, area_y + CONTENT_OFFSET_Y)
}
