//! # Transcript
//!
//! Messages exchanged in a conversation. Append-only: a message never
//! changes after it is pushed.

use chrono::{DateTime, Local};

use crate::api::{MarketingCopy, Product};

pub const WELCOME_TEXT: &str = "Hello! I'm your Blue marketplace assistant. I can help you search for products, generate marketing copy, and more. How can I assist you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// What a message renders as. Structured kinds carry their payload.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    Text,
    SearchResults(Vec<Product>),
    MarketingCopy(MarketingCopy),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Local::now(),
            kind,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, MessageKind::Text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, MessageKind::Text)
    }

    /// `HH:MM` in local time.
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript holding only the assistant's greeting.
    pub fn with_welcome() -> Self {
        let mut transcript = Self::new();
        transcript.push(Message::assistant(WELCOME_TEXT));
        transcript
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_transcript_has_one_assistant_message() {
        let transcript = Transcript::with_welcome();
        assert_eq!(transcript.len(), 1);
        let first = &transcript.messages()[0];
        assert_eq!(first.sender, Sender::Assistant);
        assert_eq!(first.kind, MessageKind::Text);
        assert!(first.text.starts_with("Hello! I'm your Blue marketplace assistant."));
    }

    #[test]
    fn message_ids_differ() {
        let a = Message::user("one");
        let b = Message::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn formatted_time_is_hour_minute() {
        let msg = Message::user("hi");
        let time = msg.formatted_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }
}
