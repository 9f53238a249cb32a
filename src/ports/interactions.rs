use serde_json::Value;

use crate::services::downstream::DownstreamError;

/// Port for the interactions service. Payloads are passed through to the page untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionFeed: Send + Sync {
    async fn recommendations(&self, user_id: &str) -> Result<Value, DownstreamError>;

    async fn trending(&self) -> Result<Value, DownstreamError>;

    async fn history(&self, user_id: &str) -> Result<Value, DownstreamError>;
}
