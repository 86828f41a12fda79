use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,

    /// Unique identifier for the pet (used in URLs)
    #[sea_orm(unique)]
    pub pet_id: Uuid,

    /// Pet name
    pub name: String,

    /// Pet kind, e.g. "dog" or "cat" (serialized as `type` on the wire)
    pub kind: String,

    /// Public id of the owner this pet belongs to
    pub owner_id: Uuid,

    /// When the pet record was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            pet_id: Set(Uuid::new_v4()),
            created_at: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
