//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keys go to exactly one place, checked in this order:
//!
//! 1. a blocking notice (only Esc/Enter dismiss it)
//! 2. the file/URL prompt, when open
//! 3. the attachment strip, when focused with Ctrl+T
//! 4. the input box
//!
//! Scrolling and Ctrl+C work everywhere.
//!
//! ## Redraw Strategy
//!
//! While a send is in flight the loop redraws every ~80ms to animate the
//! typing indicator. Otherwise it sleeps up to 500ms and only redraws on
//! input or when a background task reports back.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::MarketplaceClient;
use crate::core::action::{Action, Effect, OutboundRequest, update};
use crate::core::attachment::{Attachment, load_file, parse_dropped_paths, validate_url};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AttachmentStripEvent, AttachmentStripState, InputBox, InputEvent, MessageListState, Prompt,
    PromptEvent, PromptKind,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Which part of the screen receives keys when no overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Attachments,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub attachment_strip: AttachmentStripState,
    /// Open file/URL prompt, drawn as an overlay
    pub prompt: Option<Prompt>,
    pub focus: Focus,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            attachment_strip: AttachmentStripState::new(),
            prompt: None,
            focus: Focus::Input,
        }
    }

    /// Copies the App fields the components render from into their props.
    pub fn sync_props(&mut self, app: &App) {
        self.input_box.disabled = app.is_loading;
        self.input_box.has_attachments = !app.attachments.is_empty();
        self.input_box.focused =
            self.focus == Focus::Input && self.prompt.is_none() && app.current_notice().is_none();
        self.attachment_strip.sync(app.attachments.len());
        if app.attachments.is_empty() && self.focus == Focus::Attachments {
            self.focus = Focus::Input;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = Arc::new(MarketplaceClient::new(config.base_url.clone()));
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();
    info!("Starting TUI against {}", app.base_url);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Results from background tasks
    let (tx, rx) = mpsc::channel();

    run_effect(&app, Effect::CheckHealth, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    'event_loop: loop {
        tui.sync_props(&app);

        if app.is_loading {
            needs_redraw = true;
        }
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 300) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync_props(&app);
            let effect = route_event(&mut app, &mut tui, event);
            if run_effect(&app, effect, &tx) {
                break 'event_loop;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(&app, effect, &tx) {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Starts whatever I/O `effect` asks for. Returns `true` when the loop should exit.
fn run_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SendRequest(request) => {
            spawn_request(app, request, tx.clone());
            false
        }
        Effect::CheckHealth => {
            spawn_health_check(app, tx.clone());
            false
        }
    }
}

/// Applies one terminal event. Anything that changes domain state goes
/// through `update`; the returned effect is what the runtime must start.
pub fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    if app.current_notice().is_some() {
        if matches!(event, TuiEvent::Escape | TuiEvent::Submit) {
            return update(app, Action::DismissNotice);
        }
        return Effect::None;
    }

    if matches!(
        event,
        TuiEvent::ScrollUp | TuiEvent::ScrollDown | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown
    ) {
        tui.message_list.handle_event(&event);
        return Effect::None;
    }

    if let Some(prompt) = tui.prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(PromptEvent::Submit(value)) => {
                let kind = prompt.kind;
                if submit_prompt(app, kind, &value) {
                    tui.prompt = None;
                }
            }
            Some(PromptEvent::Cancel) => tui.prompt = None,
            None => {}
        }
        return Effect::None;
    }

    if tui.focus == Focus::Attachments {
        match tui.attachment_strip.handle_event(&event) {
            Some(AttachmentStripEvent::Remove(index)) => {
                let effect = update(app, Action::RemoveAttachment(index));
                tui.sync_props(app);
                return effect;
            }
            Some(AttachmentStripEvent::Leave) => tui.focus = Focus::Input,
            None => {}
        }
        return Effect::None;
    }

    match event {
        TuiEvent::Escape if app.error.is_some() => update(app, Action::DismissError),
        TuiEvent::OpenFilePrompt | TuiEvent::OpenUrlPrompt => {
            if app.is_loading {
                debug!("Attachment prompt blocked while a send is in flight");
            } else {
                let kind = if event == TuiEvent::OpenFilePrompt {
                    PromptKind::File
                } else {
                    PromptKind::Url
                };
                tui.prompt = Some(Prompt::new(kind));
            }
            Effect::None
        }
        TuiEvent::FocusAttachments => {
            if !app.attachments.is_empty() {
                tui.focus = Focus::Attachments;
            }
            Effect::None
        }
        TuiEvent::Paste(ref text) if !app.is_loading => match parse_dropped_paths(text) {
            Some(paths) => {
                info!("Treating paste as {} dropped file(s)", paths.len());
                attach_paths(app, &paths);
                Effect::None
            }
            None => forward_to_input(app, tui, &event),
        },
        _ => forward_to_input(app, tui, &event),
    }
}

fn forward_to_input(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match tui.input_box.handle_event(event) {
        Some(InputEvent::Submit(text)) => update(app, Action::Submit(text)),
        Some(InputEvent::ContentChanged) | None => Effect::None,
    }
}

/// Returns `true` when the prompt should close.
fn submit_prompt(app: &mut App, kind: PromptKind, value: &str) -> bool {
    match kind {
        PromptKind::File => {
            let paths = parse_dropped_paths(value).unwrap_or_else(|| vec![expand_home(value)]);
            attach_paths(app, &paths);
            true
        }
        PromptKind::Url => match validate_url(value) {
            Ok(()) => {
                update(app, Action::AddAttachment(Attachment::Url(value.to_string())));
                true
            }
            Err(err) => {
                update(app, Action::AttachmentRejected(err.to_string()));
                false
            }
        },
    }
}

/// Loads each file independently; a bad file never blocks its siblings.
fn attach_paths(app: &mut App, paths: &[PathBuf]) {
    for path in paths {
        let action = match load_file(path) {
            Ok(file) => Action::AddAttachment(Attachment::File(file)),
            Err(err) => Action::AttachmentRejected(err.to_string()),
        };
        update(app, action);
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(path).to_path_buf()
}

fn spawn_request(app: &App, request: OutboundRequest, tx: mpsc::Sender<Action>) {
    info!(
        "Spawning {:?} request ({} attachments)",
        request.intent,
        request.attachments.len()
    );
    let backend = app.backend.clone();
    tokio::spawn(async move {
        let result = request.dispatch(backend.as_ref()).await;
        if tx.send(Action::ResponseReceived(result)).is_err() {
            warn!("Failed to deliver response: receiver dropped");
        }
    });
}

fn spawn_health_check(app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    tokio::spawn(async move {
        let result = backend.check_health().await;
        if tx.send(Action::HealthChecked(result)).is_err() {
            warn!("Failed to deliver health check: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attachment::FileAttachment;
    use crate::test_support::test_app;
    use std::io::Write;

    fn setup() -> (App, TuiState) {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        (app, tui)
    }

    fn send(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        tui.sync_props(app);
        route_event(app, tui, event)
    }

    fn type_str(app: &mut App, tui: &mut TuiState, s: &str) {
        for c in s.chars() {
            send(app, tui, TuiEvent::InputChar(c));
        }
    }

    fn file_attachment(name: &str) -> Attachment {
        Attachment::File(FileAttachment {
            name: name.into(),
            mime_type: "text/plain".into(),
            size: 1,
            data: vec![b'x'],
        })
    }

    #[test]
    fn enter_submits_typed_text() {
        let (mut app, mut tui) = setup();
        type_str(&mut app, &mut tui, "find lamps");
        let effect = send(&mut app, &mut tui, TuiEvent::Submit);
        assert!(matches!(effect, Effect::SendRequest(ref r) if r.text == "find lamps"));
        assert!(app.is_loading);
        assert_eq!(tui.input_box.text(), "");
    }

    #[test]
    fn ctrl_c_quits_even_with_notice() {
        let (mut app, mut tui) = setup();
        app.notices.push_back("nope".into());
        assert_eq!(send(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn notice_blocks_typing_until_dismissed() {
        let (mut app, mut tui) = setup();
        app.notices.push_back("Unsupported file type: application/exe".into());
        app.notices.push_back("File size must be less than 10MB".into());

        send(&mut app, &mut tui, TuiEvent::InputChar('a'));
        assert_eq!(tui.input_box.text(), "");

        send(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(app.current_notice(), Some("File size must be less than 10MB"));
        send(&mut app, &mut tui, TuiEvent::Submit);
        assert!(app.current_notice().is_none());

        send(&mut app, &mut tui, TuiEvent::InputChar('a'));
        assert_eq!(tui.input_box.text(), "a");
    }

    #[test]
    fn escape_dismisses_error_banner() {
        let (mut app, mut tui) = setup();
        app.error = Some("Request failed".into());
        send(&mut app, &mut tui, TuiEvent::Escape);
        assert!(app.error.is_none());
    }

    #[test]
    fn url_prompt_adds_valid_url_and_closes() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::OpenUrlPrompt);
        assert!(tui.prompt.is_some());
        send(&mut app, &mut tui, TuiEvent::Paste("  https://shop.example/item  ".into()));
        send(&mut app, &mut tui, TuiEvent::Submit);

        assert!(tui.prompt.is_none());
        assert_eq!(
            app.attachments.items(),
            &[Attachment::Url("https://shop.example/item".into())]
        );
    }

    #[test]
    fn url_prompt_keeps_text_on_invalid_url() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::OpenUrlPrompt);
        type_str(&mut app, &mut tui, "invalid-url");
        send(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(app.current_notice(), Some("Please enter a valid URL"));
        let prompt = tui.prompt.as_ref().unwrap();
        assert_eq!(prompt.text(), "invalid-url");
        assert!(app.attachments.is_empty());
    }

    #[test]
    fn prompts_do_not_open_while_loading() {
        let (mut app, mut tui) = setup();
        app.is_loading = true;
        send(&mut app, &mut tui, TuiEvent::OpenFilePrompt);
        assert!(tui.prompt.is_none());
    }

    #[test]
    fn file_prompt_attaches_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::File::create(&path).unwrap().write_all(b"hello").unwrap();

        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::OpenFilePrompt);
        send(&mut app, &mut tui, TuiEvent::Paste(path.display().to_string()));
        send(&mut app, &mut tui, TuiEvent::Submit);

        assert!(tui.prompt.is_none());
        assert_eq!(app.attachments.len(), 1);
        assert_eq!(app.attachments.items()[0].label(), "notes.txt");
    }

    #[test]
    fn file_prompt_reports_missing_file() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::OpenFilePrompt);
        type_str(&mut app, &mut tui, "/definitely/not/here.pdf");
        send(&mut app, &mut tui, TuiEvent::Submit);

        assert!(tui.prompt.is_none());
        assert!(app.attachments.is_empty());
        let notice = app.current_notice().unwrap();
        assert!(notice.starts_with("Could not read here.pdf"), "got {notice}");
    }

    #[test]
    fn dropped_files_are_validated_individually() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("photo.png");
        let bad = dir.path().join("setup.exe");
        std::fs::write(&good, b"png").unwrap();
        std::fs::write(&bad, b"exe").unwrap();

        let (mut app, mut tui) = setup();
        let paste = format!("{} {}", good.display(), bad.display());
        send(&mut app, &mut tui, TuiEvent::Paste(paste));

        assert_eq!(app.attachments.len(), 1);
        assert_eq!(app.current_notice(), Some("Unsupported file type: application/exe"));
        assert_eq!(tui.input_box.text(), "");
    }

    #[test]
    fn ordinary_paste_goes_to_input() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::Paste("red running shoes".into()));
        assert_eq!(tui.input_box.text(), "red running shoes");
        assert!(app.attachments.is_empty());
    }

    #[test]
    fn attachment_strip_removes_selected_item() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::AddAttachment(file_attachment("a.txt")));
        update(&mut app, Action::AddAttachment(Attachment::Url("https://b.example".into())));

        send(&mut app, &mut tui, TuiEvent::FocusAttachments);
        assert_eq!(tui.focus, Focus::Attachments);
        send(&mut app, &mut tui, TuiEvent::CursorRight);
        send(&mut app, &mut tui, TuiEvent::Delete);
        assert_eq!(app.attachments.items(), &[file_attachment("a.txt")]);

        send(&mut app, &mut tui, TuiEvent::Delete);
        assert!(app.attachments.is_empty());
        tui.sync_props(&app);
        assert_eq!(tui.focus, Focus::Input);
    }

    #[test]
    fn focus_attachments_ignored_when_empty() {
        let (mut app, mut tui) = setup();
        send(&mut app, &mut tui, TuiEvent::FocusAttachments);
        assert_eq!(tui.focus, Focus::Input);
    }

    #[test]
    fn attachments_only_submit() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::AddAttachment(file_attachment("a.txt")));
        let effect = send(&mut app, &mut tui, TuiEvent::Submit);
        assert!(matches!(effect, Effect::SendRequest(ref r) if r.attachments.len() == 1));
        assert_eq!(app.transcript.last().unwrap().text, "Sent attachments");
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/tmp/a.txt"), PathBuf::from("/tmp/a.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.txt"), home.join("a.txt"));
        }
    }
}
