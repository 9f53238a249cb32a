//! One-time population of the catalog's baseline rows.
//!
//! Seeding is an ordered list of [`SeedStep`]s. Each step guards on its own target table
//! being empty, checks that the rows it references are already present, and then
//! inserts its literal rows in one statement per table. Steps never insert partially.

pub mod data;

use std::fmt;

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait};

use crate::entities::{
    actor, cast_member, content, director, dub, episode, genre, season, subtitle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    Subtitles,
    Dubs,
    Genres,
    Contents,
    Seasons,
    Episodes,
    /// Actors, the movie they are cast in, and the cast rows
    ActorsAndCast,
    /// Directors and one movie per director
    DirectorsAndContents,
}

/// A row a step needs before it can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    Genre(&'static str),
    Subtitle(&'static str),
    Dub(&'static str),
    Content(&'static str),
    Season(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The target table already had rows
    Skipped,
    /// Number of rows inserted across every table the step writes
    Inserted(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed step `{step}` requires {missing}, which is not present")]
    MissingPrerequisite {
        step: SeedStep,
        missing: Prerequisite,
    },
    #[error("seed step `{step}` failed")]
    Store {
        step: SeedStep,
        #[source]
        source: DbErr,
    },
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub steps: Vec<(SeedStep, StepOutcome)>,
}

impl SeedReport {
    pub fn inserted_rows(&self) -> u64 {
        self.steps
            .iter()
            .map(|(_, outcome)| match outcome {
                StepOutcome::Inserted(rows) => *rows,
                StepOutcome::Skipped => 0,
            })
            .sum()
    }
}

const CONTENT_PREREQUISITES: &[Prerequisite] = &[
    Prerequisite::Genre("1"),
    Prerequisite::Subtitle("1"),
    Prerequisite::Dub("1"),
];

impl SeedStep {
    /// Execution order. Later steps reference rows inserted by earlier ones.
    pub const ORDER: [SeedStep; 8] = [
        SeedStep::Subtitles,
        SeedStep::Dubs,
        SeedStep::Genres,
        SeedStep::Contents,
        SeedStep::Seasons,
        SeedStep::Episodes,
        SeedStep::ActorsAndCast,
        SeedStep::DirectorsAndContents,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeedStep::Subtitles => "subtitles",
            SeedStep::Dubs => "dubs",
            SeedStep::Genres => "genres",
            SeedStep::Contents => "contents",
            SeedStep::Seasons => "seasons",
            SeedStep::Episodes => "episodes",
            SeedStep::ActorsAndCast => "actors_and_cast",
            SeedStep::DirectorsAndContents => "directors_and_contents",
        }
    }

    pub fn prerequisites(self) -> &'static [Prerequisite] {
        match self {
            SeedStep::Subtitles | SeedStep::Dubs | SeedStep::Genres => &[],
            SeedStep::Contents | SeedStep::ActorsAndCast | SeedStep::DirectorsAndContents => {
                CONTENT_PREREQUISITES
            }
            SeedStep::Seasons => &[Prerequisite::Content("1")],
            SeedStep::Episodes => &[
                Prerequisite::Content("1"),
                Prerequisite::Season("1"),
                Prerequisite::Season("2"),
                Prerequisite::Season("3"),
            ],
        }
    }

    /// Whether the table this step guards on already has rows.
    pub async fn is_seeded<C: ConnectionTrait>(self, conn: &C) -> Result<bool, DbErr> {
        let count = match self {
            SeedStep::Subtitles => subtitle::Entity::find().count(conn).await?,
            SeedStep::Dubs => dub::Entity::find().count(conn).await?,
            SeedStep::Genres => genre::Entity::find().count(conn).await?,
            SeedStep::Contents => content::Entity::find().count(conn).await?,
            SeedStep::Seasons => season::Entity::find().count(conn).await?,
            SeedStep::Episodes => episode::Entity::find().count(conn).await?,
            SeedStep::ActorsAndCast => actor::Entity::find().count(conn).await?,
            SeedStep::DirectorsAndContents => director::Entity::find().count(conn).await?,
        };
        Ok(count > 0)
    }

    pub async fn apply<C: ConnectionTrait>(self, conn: &C) -> Result<StepOutcome, SeedError> {
        let store = |source| SeedError::Store { step: self, source };

        if self.is_seeded(conn).await.map_err(store)? {
            log::debug!("Seed step `{}` skipped: table already populated", self);
            return Ok(StepOutcome::Skipped);
        }

        for prerequisite in self.prerequisites() {
            if !prerequisite.is_present(conn).await.map_err(store)? {
                return Err(SeedError::MissingPrerequisite {
                    step: self,
                    missing: *prerequisite,
                });
            }
        }

        let rows = self.insert(conn).await.map_err(store)?;
        log::info!("Seed step `{}` inserted {} rows", self, rows);
        Ok(StepOutcome::Inserted(rows))
    }

    async fn insert<C: ConnectionTrait>(self, conn: &C) -> Result<u64, DbErr> {
        match self {
            SeedStep::Subtitles => {
                insert_all(conn, rows::<subtitle::ActiveModel, _>(data::subtitles())).await
            }
            SeedStep::Dubs => insert_all(conn, rows::<dub::ActiveModel, _>(data::dubs())).await,
            SeedStep::Genres => {
                insert_all(conn, rows::<genre::ActiveModel, _>(data::genres())).await
            }
            SeedStep::Contents => {
                insert_all(conn, rows::<content::ActiveModel, _>(data::contents())).await
            }
            SeedStep::Seasons => {
                insert_all(conn, rows::<season::ActiveModel, _>(data::seasons())).await
            }
            SeedStep::Episodes => {
                insert_all(conn, rows::<episode::ActiveModel, _>(data::episodes())).await
            }
            SeedStep::ActorsAndCast => {
                let actors =
                    insert_all(conn, rows::<actor::ActiveModel, _>(data::actors())).await?;
                let movie = insert_all(
                    conn,
                    rows::<content::ActiveModel, _>(vec![data::cast_content()]),
                )
                .await?;
                let cast =
                    insert_all(conn, rows::<cast_member::ActiveModel, _>(data::cast())).await?;
                Ok(actors + movie + cast)
            }
            SeedStep::DirectorsAndContents => {
                let directors =
                    insert_all(conn, rows::<director::ActiveModel, _>(data::directors())).await?;
                let movies = insert_all(
                    conn,
                    rows::<content::ActiveModel, _>(data::director_contents()),
                )
                .await?;
                Ok(directors + movies)
            }
        }
    }
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Prerequisite {
    async fn is_present<C: ConnectionTrait>(self, conn: &C) -> Result<bool, DbErr> {
        let found = match self {
            Prerequisite::Genre(id) => genre::Entity::find_by_id(id.to_owned())
                .one(conn)
                .await?
                .is_some(),
            Prerequisite::Subtitle(id) => subtitle::Entity::find_by_id(id.to_owned())
                .one(conn)
                .await?
                .is_some(),
            Prerequisite::Dub(id) => dub::Entity::find_by_id(id.to_owned())
                .one(conn)
                .await?
                .is_some(),
            Prerequisite::Content(id) => content::Entity::find_by_id(id.to_owned())
                .one(conn)
                .await?
                .is_some(),
            Prerequisite::Season(id) => season::Entity::find_by_id(id.to_owned())
                .one(conn)
                .await?
                .is_some(),
        };
        Ok(found)
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::Genre(id) => write!(f, "genre \"{id}\""),
            Prerequisite::Subtitle(id) => write!(f, "subtitle \"{id}\""),
            Prerequisite::Dub(id) => write!(f, "dub \"{id}\""),
            Prerequisite::Content(id) => write!(f, "content \"{id}\""),
            Prerequisite::Season(id) => write!(f, "season \"{id}\""),
        }
    }
}

async fn insert_all<C, A, I>(conn: &C, models: I) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
    A: ActiveModelTrait,
    I: IntoIterator<Item = A>,
{
    A::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
}

fn rows<A, M>(models: Vec<M>) -> impl Iterator<Item = A>
where
    A: From<M>,
{
    models.into_iter().map(A::from)
}

/// Run every step in [`SeedStep::ORDER`], stopping at the first failure.
pub async fn run<C: ConnectionTrait>(conn: &C) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    for step in SeedStep::ORDER {
        let outcome = step.apply(conn).await?;
        report.steps.push((step, outcome));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sea_orm::{ColumnTrait, QueryFilter};

    use super::*;
    use crate::test_utils::{empty_test_db, test_db};

    async fn table_counts<C: ConnectionTrait>(conn: &C) -> [u64; 9] {
        [
            subtitle::Entity::find().count(conn).await.unwrap(),
            dub::Entity::find().count(conn).await.unwrap(),
            genre::Entity::find().count(conn).await.unwrap(),
            content::Entity::find().count(conn).await.unwrap(),
            season::Entity::find().count(conn).await.unwrap(),
            episode::Entity::find().count(conn).await.unwrap(),
            actor::Entity::find().count(conn).await.unwrap(),
            cast_member::Entity::find().count(conn).await.unwrap(),
            director::Entity::find().count(conn).await.unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_seed_empty_store_populates_every_table() {
        let db = empty_test_db().await;

        let report = run(&db.conn).await.unwrap();

        assert_eq!(table_counts(&db.conn).await, [4, 4, 1, 7, 3, 6, 4, 4, 4]);
        assert_eq!(report.steps.len(), 8);
        assert!(
            report
                .steps
                .iter()
                .all(|(_, outcome)| matches!(outcome, StepOutcome::Inserted(_)))
        );
        // 4 + 4 + 1 + 2 + 3 + 6 + (4 actors + 1 movie + 4 cast) + (4 directors + 4 movies) = 37
        assert_eq!(report.inserted_rows(), 37);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = test_db().await;

        let report = run(&db.conn).await.unwrap();

        assert_eq!(report.inserted_rows(), 0);
        assert!(
            report
                .steps
                .iter()
                .all(|(_, outcome)| *outcome == StepOutcome::Skipped)
        );
        assert_eq!(table_counts(&db.conn).await, [4, 4, 1, 7, 3, 6, 4, 4, 4]);
    }

    #[tokio::test]
    async fn test_seeded_contents_reference_existing_genres() {
        let db = test_db().await;

        let genre_ids: HashSet<String> = genre::Entity::find()
            .all(&db.conn)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        let contents = content::Entity::find().all(&db.conn).await.unwrap();

        assert_eq!(contents.len(), 7);
        for item in contents {
            assert!(
                genre_ids.contains(&item.genre_id),
                "content {} references missing genre {}",
                item.id,
                item.genre_id
            );
        }
    }

    #[tokio::test]
    async fn test_contents_step_requires_genre() {
        let db = empty_test_db().await;
        SeedStep::Subtitles.apply(&db.conn).await.unwrap();
        SeedStep::Dubs.apply(&db.conn).await.unwrap();

        let err = SeedStep::Contents.apply(&db.conn).await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::MissingPrerequisite {
                step: SeedStep::Contents,
                missing: Prerequisite::Genre("1"),
            }
        ));
        assert_eq!(content::Entity::find().count(&db.conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_episodes_step_requires_seasons() {
        let db = empty_test_db().await;
        for step in &SeedStep::ORDER[..4] {
            step.apply(&db.conn).await.unwrap();
        }

        let err = SeedStep::Episodes.apply(&db.conn).await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::MissingPrerequisite {
                missing: Prerequisite::Season("1"),
                ..
            }
        ));
        assert!(err.to_string().contains("episodes"));
    }

    #[tokio::test]
    async fn test_step_skips_when_target_table_has_rows() {
        let db = empty_test_db().await;
        SeedStep::Subtitles.apply(&db.conn).await.unwrap();

        let outcome = SeedStep::Subtitles.apply(&db.conn).await.unwrap();

        assert_eq!(outcome, StepOutcome::Skipped);
        assert_eq!(subtitle::Entity::find().count(&db.conn).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_actors_step_casts_every_actor_in_linked_movie() {
        let db = test_db().await;

        let cast = cast_member::Entity::find()
            .filter(cast_member::Column::ContentId.eq(data::CAST_CONTENT_ID))
            .all(&db.conn)
            .await
            .unwrap();
        let actor_ids: Vec<_> = cast.into_iter().map(|c| c.actor_id).collect();

        assert_eq!(actor_ids.len(), 4);
        for id in ["1", "2", "3", "4"] {
            assert!(actor_ids.iter().any(|a| a == id));
        }
    }

    #[tokio::test]
    async fn test_director_movies_point_at_their_director() {
        let db = test_db().await;

        let movie = content::Entity::find_by_id("ContenidoDirectores3".to_owned())
            .one(&db.conn)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(movie.director_id.as_deref(), Some("3"));
        assert_eq!(movie.content_type, content::ContentType::Movie);
    }
}
