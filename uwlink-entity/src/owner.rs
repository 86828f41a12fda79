use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,

    /// Unique identifier for the owner (used in URLs and token subjects)
    #[sea_orm(unique)]
    pub owner_id: Uuid,

    /// Login name, unique across the registry
    #[sea_orm(unique)]
    pub username: String,

    /// Salted hash of the owner's password, never the password itself
    #[serde(skip_serializing)]
    pub hashed_password: String,

    /// When the owner signed up
    pub joined_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            owner_id: Set(Uuid::new_v4()),
            joined_at: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
