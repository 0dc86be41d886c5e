use std::fmt;

use async_trait::async_trait;

use super::types::{AssistantResponse, HealthStatus};
use crate::core::attachment::Attachment;

pub const MSG_TRANSPORT: &str = "Unable to connect to service";
pub const MSG_SERVER_UNAVAILABLE: &str = "Service temporarily unavailable";
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const MSG_REQUEST_FAILED: &str = "Request failed";
pub const MSG_HEALTH_UNAVAILABLE: &str = "Service unavailable";

/// Which class of failure an `ApiError` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection refused, DNS, I/O, or an unreadable success body. Status 0.
    Transport,
    /// HTTP 429.
    RateLimited,
    /// HTTP status >= 500.
    ServerUnavailable,
    /// Any other non-2xx status.
    RequestFailed,
    /// Health probe failed for any reason. Status 0.
    Unavailable,
}

/// A call that did not yield a usable JSON success body.
///
/// `message` is the human-readable text shown in the transcript and the
/// error banner. `status` is the HTTP status, or 0 when no response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn transport() -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: MSG_TRANSPORT.to_string(),
            status: 0,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            kind: ApiErrorKind::Unavailable,
            message: MSG_HEALTH_UNAVAILABLE.to_string(),
            status: 0,
        }
    }

    /// Classifies a non-2xx status. Checked in order: >= 500, then 429, then the rest.
    pub fn from_status(status: u16) -> Self {
        let (kind, message) = if status >= 500 {
            (ApiErrorKind::ServerUnavailable, MSG_SERVER_UNAVAILABLE)
        } else if status == 429 {
            (ApiErrorKind::RateLimited, MSG_RATE_LIMITED)
        } else {
            (ApiErrorKind::RequestFailed, MSG_REQUEST_FAILED)
        };
        Self {
            kind,
            message: message.to_string(),
            status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// The marketplace assistant service, as seen by the conversation controller.
///
/// Each call settles exactly once. No retries, no timeouts.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Posts the message and its attachments to the search endpoint.
    async fn send_message(
        &self,
        text: &str,
        attachments: &[Attachment],
    ) -> Result<AssistantResponse, ApiError>;

    /// Asks the marketing endpoint to generate ad copy for the message.
    async fn get_marketing_copy(&self, text: &str) -> Result<AssistantResponse, ApiError>;

    /// Probes the health endpoint. Every failure collapses to `ApiError::unavailable()`.
    async fn check_health(&self) -> Result<HealthStatus, ApiError>;
}
