pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, ApiErrorKind, AssistantBackend};
pub use client::{DEFAULT_BASE_URL, MarketplaceClient};
pub use types::{AssistantResponse, HealthStatus, MarketingCopy, Product};
