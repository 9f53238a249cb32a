use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::entities::{actor, content, director, dub, episode, genre, season, subtitle};
use crate::http_server::{
    error::{ClientError, Report},
    state::ContentState,
};

type JsonResult<T> = Result<Json<T>, Report>;

fn found<T>(value: Option<T>, what: &str, id: &str) -> JsonResult<T> {
    value
        .map(Json)
        .ok_or_else(|| ClientError::not_found(format!("{what} {id} not found")).into())
}

pub async fn list_genres(State(state): State<Arc<ContentState>>) -> JsonResult<Vec<genre::Model>> {
    Ok(Json(state.catalog.list_genres().await?))
}

pub async fn get_genre(
    State(state): State<Arc<ContentState>>,
    Path(genre_id): Path<String>,
) -> JsonResult<genre::Model> {
    found(state.catalog.get_genre(&genre_id).await?, "Genre", &genre_id)
}

pub async fn list_genre_contents(
    State(state): State<Arc<ContentState>>,
    Path(genre_id): Path<String>,
) -> JsonResult<Vec<content::Model>> {
    found(
        state.catalog.genre_contents(&genre_id).await?,
        "Genre",
        &genre_id,
    )
}

pub async fn list_contents(
    State(state): State<Arc<ContentState>>,
) -> JsonResult<Vec<content::Model>> {
    Ok(Json(state.catalog.list_contents().await?))
}

pub async fn get_content(
    State(state): State<Arc<ContentState>>,
    Path(content_id): Path<String>,
) -> JsonResult<content::Model> {
    found(
        state.catalog.get_content(&content_id).await?,
        "Content",
        &content_id,
    )
}

pub async fn list_content_seasons(
    State(state): State<Arc<ContentState>>,
    Path(content_id): Path<String>,
) -> JsonResult<Vec<season::Model>> {
    found(
        state.catalog.content_seasons(&content_id).await?,
        "Content",
        &content_id,
    )
}

pub async fn list_content_cast(
    State(state): State<Arc<ContentState>>,
    Path(content_id): Path<String>,
) -> JsonResult<Vec<actor::Model>> {
    found(
        state.catalog.content_cast(&content_id).await?,
        "Content",
        &content_id,
    )
}

pub async fn list_season_episodes(
    State(state): State<Arc<ContentState>>,
    Path(season_id): Path<String>,
) -> JsonResult<Vec<episode::Model>> {
    found(
        state.catalog.season_episodes(&season_id).await?,
        "Season",
        &season_id,
    )
}

pub async fn list_actors(State(state): State<Arc<ContentState>>) -> JsonResult<Vec<actor::Model>> {
    Ok(Json(state.catalog.list_actors().await?))
}

pub async fn list_directors(
    State(state): State<Arc<ContentState>>,
) -> JsonResult<Vec<director::Model>> {
    Ok(Json(state.catalog.list_directors().await?))
}

pub async fn get_director(
    State(state): State<Arc<ContentState>>,
    Path(director_id): Path<String>,
) -> JsonResult<director::Model> {
    found(
        state.catalog.get_director(&director_id).await?,
        "Director",
        &director_id,
    )
}

pub async fn list_subtitles(
    State(state): State<Arc<ContentState>>,
) -> JsonResult<Vec<subtitle::Model>> {
    Ok(Json(state.catalog.list_subtitles().await?))
}

pub async fn list_dubs(State(state): State<Arc<ContentState>>) -> JsonResult<Vec<dub::Model>> {
    Ok(Json(state.catalog.list_dubs().await?))
}
