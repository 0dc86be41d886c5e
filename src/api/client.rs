//! HTTP client for the marketplace assistant service.
//!
//! Three endpoints, one error taxonomy. A non-2xx status is classified by
//! [`ApiError::from_status`]; anything that goes wrong before a status is
//! available (or while reading a 2xx body that is not JSON) is a transport
//! error. Any JSON body counts as a reply; fields that do not fit are dropped.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::backend::{ApiError, AssistantBackend};
use super::types::{AssistantResponse, HealthStatus, MarketingRequest};
use crate::core::attachment::Attachment;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub struct MarketplaceClient {
    base_url: String,
    client: reqwest::Client,
}

impl MarketplaceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Builds the `/search` multipart body.
///
/// Field names carry the attachment's position in the pending list, so a
/// URL at index 1 is `url_1` even when index 0 was a file.
pub fn build_search_form(text: &str, attachments: &[Attachment]) -> Result<Form, ApiError> {
    let mut form = Form::new().text("message", text.to_string());

    for (index, attachment) in attachments.iter().enumerate() {
        match attachment {
            Attachment::File(file) => {
                let part = Part::bytes(file.data.clone())
                    .file_name(file.name.clone())
                    .mime_str(&file.mime_type)
                    .map_err(|e| {
                        warn!("Invalid MIME type {:?} for {}: {}", file.mime_type, file.name, e);
                        ApiError::transport()
                    })?;
                form = form.part(format!("file_{index}"), part);
            }
            Attachment::Url(url) => {
                form = form.text(format!("url_{index}"), url.clone());
            }
        }
    }

    Ok(form)
}

/// Rejects non-2xx statuses, then parses the JSON body.
async fn handle_response<T: DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        let err = ApiError::from_status(status.as_u16());
        warn!("Request rejected with HTTP {}: {}", status.as_u16(), err.message);
        return Err(err);
    }

    let body = response.json::<serde_json::Value>().await.map_err(|e| {
        warn!("Failed to read response body: {}", e);
        ApiError::transport()
    })?;

    Ok(T::deserialize(body).unwrap_or_else(|e| {
        warn!("Unexpected response shape, treating as empty: {}", e);
        T::default()
    }))
}

#[async_trait]
impl AssistantBackend for MarketplaceClient {
    async fn send_message(
        &self,
        text: &str,
        attachments: &[Attachment],
    ) -> Result<AssistantResponse, ApiError> {
        let form = build_search_form(text, attachments)?;
        info!(
            "POST /search: message_len={}, attachments={}",
            text.len(),
            attachments.len()
        );

        let response = self
            .client
            .post(self.endpoint("search"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Search request failed: {}", e);
                ApiError::transport()
            })?;

        handle_response(response).await
    }

    async fn get_marketing_copy(&self, text: &str) -> Result<AssistantResponse, ApiError> {
        info!("POST /marketing: message_len={}", text.len());

        let response = self
            .client
            .post(self.endpoint("marketing"))
            .json(&MarketingRequest { message: text })
            .send()
            .await
            .map_err(|e| {
                warn!("Marketing request failed: {}", e);
                ApiError::transport()
            })?;

        handle_response(response).await
    }

    async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        debug!("GET /health");

        let response = match self.client.get(self.endpoint("health")).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Health check failed: {}", e);
                return Err(ApiError::unavailable());
            }
        };

        handle_response::<HealthStatus>(response)
            .await
            .map_err(|_| ApiError::unavailable())
    }
}
