use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Language tracks, referenced by id only
        manager
            .create_table(
                Table::create()
                    .table(Subtitle::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subtitle::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Subtitle::Language).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Dub::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Dub::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Dub::Language).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Genre::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Genre::Name).string().not_null())
                    .col(ColumnDef::new(Genre::Description).string())
                    .to_owned(),
            )
            .await?;

        // Director, subtitle and dub ids are plain columns: content rows may name a
        // director before the directors table is populated.
        manager
            .create_table(
                Table::create()
                    .table(Content::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Content::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Content::ContentType).string().not_null())
                    .col(ColumnDef::new(Content::Title).string().not_null())
                    .col(ColumnDef::new(Content::Description).string())
                    .col(ColumnDef::new(Content::ReleaseDate).string())
                    .col(ColumnDef::new(Content::GenreId).string().not_null())
                    .col(
                        ColumnDef::new(Content::RatingAverage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Content::SubtitleId).string())
                    .col(ColumnDef::new(Content::DubId).string())
                    .col(ColumnDef::new(Content::Duration).integer())
                    .col(ColumnDef::new(Content::DirectorId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contents_genre_id")
                            .from(Content::Table, Content::GenreId)
                            .to(Genre::Table, Genre::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Season::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Season::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Season::ContentId).string().not_null())
                    .col(ColumnDef::new(Season::SeasonNumber).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seasons_content_id")
                            .from(Season::Table, Season::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Episode::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Episode::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Episode::ContentId).string().not_null())
                    .col(ColumnDef::new(Episode::SeasonId).string().not_null())
                    .col(ColumnDef::new(Episode::DirectorId).string())
                    .col(ColumnDef::new(Episode::EpisodeNumber).integer().not_null())
                    .col(ColumnDef::new(Episode::Duration).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episodes_content_id")
                            .from(Episode::Table, Episode::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episodes_season_id")
                            .from(Episode::Table, Episode::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Actor::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Actor::Name).string().not_null())
                    .col(ColumnDef::new(Actor::Nationality).string())
                    .col(ColumnDef::new(Actor::BirthDate).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Director::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Director::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Director::Name).string().not_null())
                    .col(ColumnDef::new(Director::Nationality).string())
                    .col(ColumnDef::new(Director::BirthDate).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CastMember::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CastMember::ContentId).string().not_null())
                    .col(ColumnDef::new(CastMember::ActorId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(CastMember::ContentId)
                            .col(CastMember::ActorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cast_members_content_id")
                            .from(CastMember::Table, CastMember::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cast_members_actor_id")
                            .from(CastMember::Table, CastMember::ActorId)
                            .to(Actor::Table, Actor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents
        manager
            .drop_table(Table::drop().table(CastMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Director::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episode::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Season::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Content::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genre::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dub::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subtitle::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subtitle {
    #[sea_orm(iden = "subtitles")]
    Table,
    Id,
    Language,
}

#[derive(DeriveIden)]
enum Dub {
    #[sea_orm(iden = "dubs")]
    Table,
    Id,
    Language,
}

#[derive(DeriveIden)]
enum Genre {
    #[sea_orm(iden = "genres")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Content {
    #[sea_orm(iden = "contents")]
    Table,
    Id,
    ContentType,
    Title,
    Description,
    ReleaseDate,
    GenreId,
    RatingAverage,
    SubtitleId,
    DubId,
    Duration,
    DirectorId,
}

#[derive(DeriveIden)]
enum Season {
    #[sea_orm(iden = "seasons")]
    Table,
    Id,
    ContentId,
    SeasonNumber,
}

#[derive(DeriveIden)]
enum Episode {
    #[sea_orm(iden = "episodes")]
    Table,
    Id,
    ContentId,
    SeasonId,
    DirectorId,
    EpisodeNumber,
    Duration,
}

#[derive(DeriveIden)]
enum Actor {
    #[sea_orm(iden = "actors")]
    Table,
    Id,
    Name,
    Nationality,
    BirthDate,
}

#[derive(DeriveIden)]
enum Director {
    #[sea_orm(iden = "directors")]
    Table,
    Id,
    Name,
    Nationality,
    BirthDate,
}

#[derive(DeriveIden)]
enum CastMember {
    #[sea_orm(iden = "cast_members")]
    Table,
    ContentId,
    ActorId,
}
