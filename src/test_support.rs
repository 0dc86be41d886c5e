//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, AssistantBackend, AssistantResponse, HealthStatus};
use crate::core::attachment::Attachment;

/// A backend that answers every call with an empty success and remembers what it was asked.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl AssistantBackend for RecordingBackend {
    async fn send_message(
        &self,
        text: &str,
        attachments: &[Attachment],
    ) -> Result<AssistantResponse, ApiError> {
        self.record(format!("search:{}:{}", text, attachments.len()));
        Ok(AssistantResponse::default())
    }

    async fn get_marketing_copy(&self, text: &str) -> Result<AssistantResponse, ApiError> {
        self.record(format!("marketing:{text}"));
        Ok(AssistantResponse::default())
    }

    async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health".to_string());
        Ok(HealthStatus::default())
    }
}

/// Creates a test App backed by a RecordingBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(RecordingBackend::default()),
        "http://test.local".to_string(),
    )
}
