use std::sync::Arc;

use color_eyre::eyre::Context;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::database::Database;
use crate::entities::{actor, content, director, dub, episode, genre, season, subtitle};

/// Read access to the catalog. Every call runs in its own store session.
///
/// Lookups scoped to a parent (`genre_contents`, `content_seasons`, ...) return `None` when
/// the parent itself does not exist, so callers can tell "missing" from "empty".
pub struct CatalogService {
    db: Arc<Database>,
}

impl CatalogService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list_genres(&self) -> color_eyre::Result<Vec<genre::Model>> {
        let session = self.db.session().await?;
        genre::Entity::find()
            .order_by_asc(genre::Column::Id)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch genres")
    }

    pub async fn get_genre(&self, genre_id: &str) -> color_eyre::Result<Option<genre::Model>> {
        let session = self.db.session().await?;
        genre::Entity::find_by_id(genre_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch genre {genre_id}"))
    }

    pub async fn genre_contents(
        &self,
        genre_id: &str,
    ) -> color_eyre::Result<Option<Vec<content::Model>>> {
        let session = self.db.session().await?;
        let Some(genre) = genre::Entity::find_by_id(genre_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch genre {genre_id}"))?
        else {
            return Ok(None);
        };

        let contents = genre
            .find_related(content::Entity)
            .order_by_asc(content::Column::Title)
            .all(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch contents of genre {genre_id}"))?;
        Ok(Some(contents))
    }

    pub async fn list_contents(&self) -> color_eyre::Result<Vec<content::Model>> {
        let session = self.db.session().await?;
        content::Entity::find()
            .order_by_asc(content::Column::Title)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch contents")
    }

    pub async fn get_content(
        &self,
        content_id: &str,
    ) -> color_eyre::Result<Option<content::Model>> {
        let session = self.db.session().await?;
        content::Entity::find_by_id(content_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch content {content_id}"))
    }

    pub async fn content_seasons(
        &self,
        content_id: &str,
    ) -> color_eyre::Result<Option<Vec<season::Model>>> {
        let session = self.db.session().await?;
        let Some(content) = content::Entity::find_by_id(content_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch content {content_id}"))?
        else {
            return Ok(None);
        };

        let seasons = content
            .find_related(season::Entity)
            .order_by_asc(season::Column::SeasonNumber)
            .order_by_asc(season::Column::Id)
            .all(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch seasons of content {content_id}"))?;
        Ok(Some(seasons))
    }

    pub async fn content_cast(
        &self,
        content_id: &str,
    ) -> color_eyre::Result<Option<Vec<actor::Model>>> {
        let session = self.db.session().await?;
        let Some(content) = content::Entity::find_by_id(content_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch content {content_id}"))?
        else {
            return Ok(None);
        };

        let actors = content
            .find_related(actor::Entity)
            .order_by_asc(actor::Column::Name)
            .all(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch cast of content {content_id}"))?;
        Ok(Some(actors))
    }

    pub async fn season_episodes(
        &self,
        season_id: &str,
    ) -> color_eyre::Result<Option<Vec<episode::Model>>> {
        let session = self.db.session().await?;
        let season = season::Entity::find_by_id(season_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch season {season_id}"))?;
        if season.is_none() {
            return Ok(None);
        }

        let episodes = episode::Entity::find()
            .filter(episode::Column::SeasonId.eq(season_id))
            .order_by_asc(episode::Column::EpisodeNumber)
            .all(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch episodes of season {season_id}"))?;
        Ok(Some(episodes))
    }

    pub async fn list_actors(&self) -> color_eyre::Result<Vec<actor::Model>> {
        let session = self.db.session().await?;
        actor::Entity::find()
            .order_by_asc(actor::Column::Id)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch actors")
    }

    pub async fn list_directors(&self) -> color_eyre::Result<Vec<director::Model>> {
        let session = self.db.session().await?;
        director::Entity::find()
            .order_by_asc(director::Column::Id)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch directors")
    }

    pub async fn get_director(
        &self,
        director_id: &str,
    ) -> color_eyre::Result<Option<director::Model>> {
        let session = self.db.session().await?;
        director::Entity::find_by_id(director_id.to_owned())
            .one(&*session)
            .await
            .wrap_err_with(|| format!("Failed to fetch director {director_id}"))
    }

    pub async fn list_subtitles(&self) -> color_eyre::Result<Vec<subtitle::Model>> {
        let session = self.db.session().await?;
        subtitle::Entity::find()
            .order_by_asc(subtitle::Column::Id)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch subtitles")
    }

    pub async fn list_dubs(&self) -> color_eyre::Result<Vec<dub::Model>> {
        let session = self.db.session().await?;
        dub::Entity::find()
            .order_by_asc(dub::Column::Id)
            .all(&*session)
            .await
            .wrap_err("Failed to fetch dubs")
    }
}
