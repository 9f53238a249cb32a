use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nacionalidad")]
    pub nationality: Option<String>,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cast_member::Entity")]
    CastMember,
}

impl Related<super::content::Entity> for Entity {
    fn to() -> RelationDef {
        super::cast_member::Relation::Content.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cast_member::Relation::Actor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
