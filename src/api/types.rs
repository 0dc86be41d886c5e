use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads a field of any JSON type, falling back to the default when it
/// does not fit `T`. A `null` price becomes `0.0`, a string where an
/// object was expected becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A product returned by the search endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub link: String,
}

/// Generated ad copy returned by the marketing endpoint (and sometimes by search).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MarketingCopy {
    #[serde(default, deserialize_with = "lenient")]
    pub headlines: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub descriptions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub call_to_action: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_segments: Option<Vec<String>>,
}

/// The success body of `/search` or `/marketing`.
///
/// The service does not commit to a shape; the controller inspects these
/// fields in a fixed priority order. Unknown fields are ignored and a field
/// of the wrong type reads as absent.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AssistantResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub search_results: Option<Vec<Product>>,
    #[serde(default, deserialize_with = "lenient")]
    pub marketing_copy: Option<MarketingCopy>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

/// JSON body for `POST /marketing`.
#[derive(Serialize, Debug)]
pub struct MarketingRequest<'a> {
    pub message: &'a str,
}

/// Body of `GET /health`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub status: String,
}
