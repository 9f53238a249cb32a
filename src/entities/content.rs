use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Catalog item kind, stored as the labels the catalog has always used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ContentType {
    #[sea_orm(string_value = "Pelicula")]
    #[serde(rename = "Pelicula")]
    Movie,
    #[sea_orm(string_value = "Serie")]
    #[serde(rename = "Serie")]
    Series,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[serde(rename = "tipoContenido")]
    pub content_type: ContentType,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Kept as text: the catalog uses `0000-00-00` for unknown release dates.
    #[serde(rename = "fechaLanzamiento")]
    pub release_date: Option<String>,
    #[serde(rename = "idGenero")]
    pub genre_id: String,
    #[sea_orm(column_type = "Double")]
    #[serde(rename = "valoracionPromedio")]
    pub rating_average: f64,
    #[serde(rename = "idSubtitulosContenido")]
    pub subtitle_id: Option<String>,
    #[serde(rename = "idDoblajeContenido")]
    pub dub_id: Option<String>,
    /// Minutes; series carry no duration of their own.
    #[serde(rename = "duracion")]
    pub duration: Option<i32>,
    #[serde(rename = "idDirector")]
    pub director_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id"
    )]
    Genre,
    #[sea_orm(has_many = "super::season::Entity")]
    Season,
    #[sea_orm(has_many = "super::cast_member::Entity")]
    CastMember,
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        super::cast_member::Relation::Actor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cast_member::Relation::Content.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
