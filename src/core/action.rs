//! # Actions
//!
//! Everything that can happen in Blue becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The service answers? That's `Action::ResponseReceived(result)`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing any I/O the runtime should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The send cycle is the only state machine:
//!
//! ```text
//!   idle ──Submit──▶ awaiting-response ──ResponseReceived──▶ idle
//!          (is_loading = true)            (is_loading = false,
//!                                          attachments cleared)
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, AssistantBackend, AssistantResponse, HealthStatus};
use crate::core::attachment::Attachment;
use crate::core::intent::Intent;
use crate::core::message::{Message, MessageKind, Sender};
use crate::core::state::App;

pub const ATTACHMENTS_ONLY_TEXT: &str = "Sent attachments";
pub const SEARCH_RESULTS_TEXT: &str = "Here are the products I found:";
pub const MARKETING_COPY_TEXT: &str = "Here's the marketing copy I generated:";
pub const UNPROCESSED_TEXT: &str =
    "I received your request but couldn't process it properly. Please try again.";

pub enum Action {
    /// The input box was submitted with this text.
    Submit(String),
    /// The outstanding send settled.
    ResponseReceived(Result<AssistantResponse, ApiError>),
    HealthChecked(Result<HealthStatus, ApiError>),
    AddAttachment(Attachment),
    /// A file or URL failed validation; the message is shown as a blocking notice.
    AttachmentRejected(String),
    RemoveAttachment(usize),
    DismissNotice,
    DismissError,
    Quit,
}

impl std::fmt::Debug for Action {
    // Attachments can hold megabytes; log a summary instead of the bytes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Submit(text) => write!(f, "Submit({} bytes)", text.len()),
            Action::ResponseReceived(Ok(_)) => write!(f, "ResponseReceived(Ok)"),
            Action::ResponseReceived(Err(e)) => write!(f, "ResponseReceived(Err({e}))"),
            Action::HealthChecked(r) => write!(f, "HealthChecked(ok={})", r.is_ok()),
            Action::AddAttachment(a) => write!(f, "AddAttachment({})", a.label()),
            Action::AttachmentRejected(msg) => write!(f, "AttachmentRejected({msg})"),
            Action::RemoveAttachment(i) => write!(f, "RemoveAttachment({i})"),
            Action::DismissNotice => write!(f, "DismissNotice"),
            Action::DismissError => write!(f, "DismissError"),
            Action::Quit => write!(f, "Quit"),
        }
    }
}

/// A send the runtime must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub intent: Intent,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl OutboundRequest {
    /// Routes to the endpoint the intent selected. Marketing requests drop attachments.
    pub async fn dispatch(
        &self,
        backend: &dyn AssistantBackend,
    ) -> Result<AssistantResponse, ApiError> {
        match self.intent {
            Intent::Marketing => backend.get_marketing_copy(&self.text).await,
            Intent::Search => backend.send_message(&self.text, &self.attachments).await,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    SendRequest(OutboundRequest),
    CheckHealth,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),
        Action::ResponseReceived(result) => {
            match result {
                Ok(response) => {
                    let message = interpret_response(response);
                    debug!("Appending assistant message of kind {:?}", kind_name(&message.kind));
                    app.transcript.push(message);
                }
                Err(err) => {
                    warn!("Send failed: {} (status {})", err.message, err.status);
                    app.transcript.push(Message::assistant(format!(
                        "Sorry, I encountered an error: {}",
                        err.message
                    )));
                    app.error = Some(err.message);
                }
            }
            app.is_loading = false;
            app.attachments.clear();
            Effect::None
        }
        Action::HealthChecked(result) => {
            app.status_message = match result {
                Ok(health) if health.status.is_empty() => "Service online".to_string(),
                Ok(health) => format!("Service online ({})", health.status),
                Err(err) => err.message,
            };
            Effect::None
        }
        Action::AddAttachment(attachment) => {
            if app.is_loading {
                warn!("Ignoring attachment {} while a send is in flight", attachment.label());
            } else {
                info!("Attachment added: {}", attachment.label());
                app.attachments.push(attachment);
            }
            Effect::None
        }
        Action::AttachmentRejected(reason) => {
            info!("Attachment rejected: {}", reason);
            app.notices.push_back(reason);
            Effect::None
        }
        Action::RemoveAttachment(index) => {
            if let Some(removed) = app.attachments.remove(index) {
                info!("Attachment removed: {}", removed.label());
            }
            Effect::None
        }
        Action::DismissNotice => {
            app.notices.pop_front();
            Effect::None
        }
        Action::DismissError => {
            app.error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    if app.is_loading {
        debug!("Submit ignored: a send is already in flight");
        return Effect::None;
    }

    let text = text.trim().to_string();
    if text.is_empty() && app.attachments.is_empty() {
        return Effect::None;
    }

    app.error = None;
    let shown = if text.is_empty() {
        ATTACHMENTS_ONLY_TEXT.to_string()
    } else {
        text.clone()
    };
    app.transcript.push(Message::user(shown));
    app.is_loading = true;

    let intent = app.classifier.classify(&text);
    info!(
        "Submitting message: intent={:?}, attachments={}",
        intent,
        app.attachments.len()
    );

    Effect::SendRequest(OutboundRequest {
        intent,
        text,
        attachments: app.attachments.items().to_vec(),
    })
}

/// Picks the message for a successful response.
///
/// Precedence is fixed: search results, then marketing copy, then a plain
/// message, then the fallback.
pub fn interpret_response(response: AssistantResponse) -> Message {
    if let Some(products) = response.search_results
        && !products.is_empty()
    {
        return Message::new(
            Sender::Assistant,
            SEARCH_RESULTS_TEXT,
            MessageKind::SearchResults(products),
        );
    }

    if let Some(copy) = response.marketing_copy {
        return Message::new(
            Sender::Assistant,
            MARKETING_COPY_TEXT,
            MessageKind::MarketingCopy(copy),
        );
    }

    match response.message {
        Some(text) if !text.is_empty() => Message::assistant(text),
        _ => Message::assistant(UNPROCESSED_TEXT),
    }
}

fn kind_name(kind: &MessageKind) -> &'static str {
    match kind {
        MessageKind::Text => "text",
        MessageKind::SearchResults(_) => "search_results",
        MessageKind::MarketingCopy(_) => "marketing_copy",
    }
}
