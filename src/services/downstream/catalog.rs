use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::ports::catalog::{CatalogClient, GenreSummary};
use crate::services::downstream::{DownstreamError, ServiceClient};

pub struct ContentServiceHttpAdapter {
    client: ServiceClient,
}

impl ContentServiceHttpAdapter {
    pub fn new(base: Url, http: Client) -> Self {
        Self {
            client: ServiceClient::new("content", base, http),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for ContentServiceHttpAdapter {
    async fn genres(&self) -> Result<Vec<GenreSummary>, DownstreamError> {
        self.client.get_json(&["generos"]).await
    }

    async fn genre_contents(&self, genre_id: &str) -> Result<Value, DownstreamError> {
        self.client
            .get_json(&["generos", genre_id, "contenidos"])
            .await
    }
}
