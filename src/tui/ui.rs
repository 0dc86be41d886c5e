use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::attachment_strip::strip_height;
use crate::tui::components::{
    AttachmentStrip, ErrorBanner, MessageList, Notice, TitleBar,
};
use crate::tui::{Focus, TuiState};

/// Draws one frame.
///
/// ```text
/// ┌ title bar ──────────────────────────────┐  1
/// │ error banner (only while an error is set)│  0..1
/// │ transcript                               │  fill
/// │ attachment strip (only when non-empty)   │  0..3
/// │ input box                                │  3..7
/// └──────────────────────────────────────────┘
/// ```
///
/// The prompt and the notice are overlays drawn last, notice on top.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let banner_height = u16::from(app.error.is_some());
    let attachments = app.attachments.items();
    let input_height = tui.input_box.calculate_height(area.width);

    let [title_area, banner_area, list_area, strip_area, input_area] = Layout::vertical([
        Length(1),
        Length(banner_height),
        Min(0),
        Length(strip_height(attachments)),
        Length(input_height),
    ])
    .areas(area);

    TitleBar::new(
        app.status_message.clone(),
        app.base_url.clone(),
        !tui.message_list.stick_to_bottom,
    )
    .render(frame, title_area);

    if let Some(error) = &app.error {
        ErrorBanner::new(error).render(frame, banner_area);
    }

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.is_loading,
        spinner_frame,
    )
    .render(frame, list_area);

    if !attachments.is_empty() {
        AttachmentStrip::new(
            &tui.attachment_strip,
            attachments,
            tui.focus == Focus::Attachments,
        )
        .render(frame, strip_area);
    }

    tui.input_box.render(frame, input_area);

    if let Some(prompt) = tui.prompt.as_mut() {
        prompt.render(frame, area);
    }

    if let Some(message) = app.current_notice() {
        Notice::new(message, app.notices.len() - 1).render(frame, area);
    }
}
