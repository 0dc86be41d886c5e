//! # Application State
//!
//! Core conversation state. Domain data only; presentation state (scroll
//! offsets, prompts, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AssistantBackend>    // marketplace service
//! ├── classifier: Arc<dyn IntentClassifier> // search vs. marketing routing
//! ├── transcript: Transcript                // append-only message history
//! ├── attachments: PendingAttachments       // queued for the next send
//! ├── is_loading: bool                      // one send outstanding
//! ├── error: Option<String>                 // dismissible banner
//! ├── notices: VecDeque<String>             // blocking notices, oldest first
//! ├── status_message: String                // title bar text
//! └── base_url: String                      // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::api::AssistantBackend;
use crate::core::attachment::PendingAttachments;
use crate::core::config::ResolvedConfig;
use crate::core::intent::{IntentClassifier, KeywordClassifier};
use crate::core::message::Transcript;

pub struct App {
    pub backend: Arc<dyn AssistantBackend>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub transcript: Transcript,
    pub attachments: PendingAttachments,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Attachment rejections waiting to be acknowledged. The front one is shown.
    pub notices: VecDeque<String>,
    pub status_message: String,
    pub base_url: String,
}

impl App {
    pub fn new(backend: Arc<dyn AssistantBackend>, base_url: String) -> Self {
        Self {
            backend,
            classifier: Arc::new(KeywordClassifier::default()),
            transcript: Transcript::with_welcome(),
            attachments: PendingAttachments::new(),
            is_loading: false,
            error: None,
            notices: VecDeque::new(),
            status_message: String::from("Checking service..."),
            base_url,
        }
    }

    pub fn from_config(backend: Arc<dyn AssistantBackend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend, config.base_url.clone());
        app.classifier = Arc::new(KeywordClassifier::new(config.marketing_keywords.clone()));
        app
    }

    /// The notice currently blocking input, if any.
    pub fn current_notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::message::Sender;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(!app.is_loading);
        assert!(app.error.is_none());
        assert!(app.attachments.is_empty());
        assert!(app.current_notice().is_none());
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.transcript.messages()[0].sender, Sender::Assistant);
    }
}
