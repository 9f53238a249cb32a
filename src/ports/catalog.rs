use serde::Deserialize;
use serde_json::Value;

use crate::services::downstream::DownstreamError;

/// A genre as listed by the content service; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenreSummary {
    #[serde(rename = "idGenero")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Port for the content service as seen from the gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn genres(&self) -> Result<Vec<GenreSummary>, DownstreamError>;

    async fn genre_contents(&self, genre_id: &str) -> Result<Value, DownstreamError>;
}
