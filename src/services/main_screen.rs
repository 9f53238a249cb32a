use std::sync::Arc;

use color_eyre::eyre::Context;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;

use crate::ports::catalog::CatalogClient;
use crate::ports::interactions::InteractionFeed;
use crate::services::downstream::DownstreamError;

/// A genre and the contents listed under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreShelf {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "contenidos")]
    pub contents: Value,
}

/// Context handed to the main-screen template. Absent sections are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MainScreenContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "recomendaciones", skip_serializing_if = "Value::is_null")]
    pub recommendations: Value,
    #[serde(rename = "tendencias", skip_serializing_if = "Value::is_null")]
    pub trending: Value,
    #[serde(rename = "historial", skip_serializing_if = "Value::is_null")]
    pub history: Value,
    #[serde(
        rename = "generos_con_contenidos",
        skip_serializing_if = "Option::is_none"
    )]
    pub genres_with_contents: Option<Vec<GenreShelf>>,
}

impl MainScreenContext {
    /// Context right after login or registration: only the user id is known.
    pub fn for_user(user_id: Option<String>) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }
}

/// Assembles the main screen from the interactions and content services.
pub struct MainScreenService {
    interactions: Arc<dyn InteractionFeed>,
    catalog: Arc<dyn CatalogClient>,
}

impl MainScreenService {
    pub fn new(interactions: Arc<dyn InteractionFeed>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            interactions,
            catalog,
        }
    }

    /// One call each for recommendations, trending, history and the genre list, then one
    /// call per genre. Any failing call fails the whole page.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, user_id: &str) -> color_eyre::Result<MainScreenContext> {
        let (recommendations, trending, history) = futures::try_join!(
            self.interactions.recommendations(user_id),
            self.interactions.trending(),
            self.interactions.history(user_id),
        )
        .wrap_err("Failed to load interactions for main screen")?;

        let genres = self
            .catalog
            .genres()
            .await
            .wrap_err("Failed to load genres for main screen")?;

        let shelves = try_join_all(genres.into_iter().map(|genre| async move {
            let contents = self.catalog.genre_contents(&genre.id).await?;
            Ok::<_, DownstreamError>(GenreShelf {
                name: genre.name,
                contents,
            })
        }))
        .await
        .wrap_err("Failed to load genre contents for main screen")?;

        log::debug!(
            "Main screen for user {} assembled with {} genres",
            user_id,
            shelves.len()
        );

        Ok(MainScreenContext {
            user_id: Some(user_id.to_string()),
            recommendations,
            trending,
            history,
            genres_with_contents: Some(shelves),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use reqwest::StatusCode;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::ports::catalog::{GenreSummary, MockCatalogClient};
    use crate::ports::interactions::MockInteractionFeed;

    fn feed_for(user_id: &'static str) -> MockInteractionFeed {
        let mut feed = MockInteractionFeed::new();
        feed.expect_recommendations()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(json!(["rec"])));
        feed.expect_trending()
            .times(1)
            .returning(|| Ok(json!(["hot"])));
        feed.expect_history()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(json!(["seen"])));
        feed
    }

    fn genre(id: &str, name: &str) -> GenreSummary {
        GenreSummary {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_contents_call_per_genre() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_genres().times(1).returning(|| {
            Ok(vec![
                genre("1", "Drama"),
                genre("2", "Comedia"),
                genre("3", "Terror"),
            ])
        });
        for id in ["1", "2", "3"] {
            catalog
                .expect_genre_contents()
                .with(eq(id))
                .times(1)
                .returning(|id| Ok(json!([format!("content-of-{id}")])));
        }

        let service = MainScreenService::new(Arc::new(feed_for("u1")), Arc::new(catalog));
        let context = service.load("u1").await.unwrap();

        let shelves = context.genres_with_contents.unwrap();
        let names: Vec<_> = shelves.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Drama", "Comedia", "Terror"]);
        assert_eq!(shelves[1].contents, json!(["content-of-2"]));
        assert_eq!(context.recommendations, json!(["rec"]));
        assert_eq!(context.trending, json!(["hot"]));
        assert_eq!(context.history, json!(["seen"]));
    }

    #[tokio::test]
    async fn test_no_genres_means_no_contents_calls() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_genres().times(1).returning(|| Ok(vec![]));
        catalog.expect_genre_contents().never();

        let service = MainScreenService::new(Arc::new(feed_for("u1")), Arc::new(catalog));
        let context = service.load("u1").await.unwrap();

        assert_eq!(context.genres_with_contents, Some(vec![]));
    }

    #[tokio::test]
    async fn test_failing_contents_call_fails_page() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_genres()
            .returning(|| Ok(vec![genre("1", "Drama"), genre("2", "Comedia")]));
        catalog.expect_genre_contents().returning(|id| {
            if id == "2" {
                Err(DownstreamError::Status {
                    service: "content",
                    endpoint: Url::parse("http://content/generos/2/contenidos").unwrap(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                Ok(json!([]))
            }
        });

        let service = MainScreenService::new(Arc::new(feed_for("u1")), Arc::new(catalog));
        let err = service.load("u1").await.unwrap_err();

        assert!(err.downcast_ref::<DownstreamError>().is_some());
    }

    #[test]
    fn test_login_context_only_carries_user_id() {
        let context = MainScreenContext::for_user(Some("42".into()));
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({"user_id": "42"}));
    }
}
