use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::ports::interactions::InteractionFeed;
use crate::services::downstream::{DownstreamError, ServiceClient};

pub struct InteractionServiceHttpAdapter {
    client: ServiceClient,
}

impl InteractionServiceHttpAdapter {
    pub fn new(base: Url, http: Client) -> Self {
        Self {
            client: ServiceClient::new("interactions", base, http),
        }
    }
}

#[async_trait::async_trait]
impl InteractionFeed for InteractionServiceHttpAdapter {
    async fn recommendations(&self, user_id: &str) -> Result<Value, DownstreamError> {
        self.client
            .get_json(&["usuarios", user_id, "recomendaciones"])
            .await
    }

    async fn trending(&self) -> Result<Value, DownstreamError> {
        self.client.get_json(&["contenido", "tendencias"]).await
    }

    async fn history(&self, user_id: &str) -> Result<Value, DownstreamError> {
        self.client
            .get_json(&["usuarios", user_id, "historial"])
            .await
    }
}
