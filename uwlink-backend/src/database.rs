use crate::error::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use uwlink_migration::{Migrator, MigratorTrait};

pub async fn setup_database(database_url: &str) -> Result<DatabaseConnection> {
    tracing::info!("🔗 Connecting to database: {}", database_url);

    // Configure connection options
    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    // Connect to database
    let db = Database::connect(opt).await?;

    // Run migrations
    tracing::info!("🔄 Running database migrations...");
    Migrator::up(&db, None).await?;
    tracing::info!("✅ Migrations completed successfully");

    Ok(db)
}

// Helper functions for owner operations
pub mod owner_ops {
    use super::*;
    use sea_orm::*;
    use uuid::Uuid;
    use uwlink_entity::{owner, prelude::*};

    pub async fn create_owner(
        db: &DatabaseConnection,
        username: String,
        hashed_password: String,
    ) -> Result<owner::Model> {
        let owner_model = owner::ActiveModel {
            username: Set(username),
            hashed_password: Set(hashed_password),
            ..owner::ActiveModel::new()
        };

        let owner = owner_model.insert(db).await?;
        Ok(owner)
    }

    pub async fn get_owner_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<owner::Model>> {
        let owner = Owner::find()
            .filter(owner::Column::Username.eq(username))
            .one(db)
            .await?;

        Ok(owner)
    }

    pub async fn get_owner_by_public_id(
        db: &DatabaseConnection,
        owner_id: Uuid,
    ) -> Result<Option<owner::Model>> {
        let owner = Owner::find()
            .filter(owner::Column::OwnerId.eq(owner_id))
            .one(db)
            .await?;

        Ok(owner)
    }

    pub async fn list_owners(db: &DatabaseConnection) -> Result<Vec<owner::Model>> {
        let owners = Owner::find().all(db).await?;
        Ok(owners)
    }
}

// Helper functions for pet operations
pub mod pet_ops {
    use super::*;
    use sea_orm::*;
    use uuid::Uuid;
    use uwlink_entity::{pet, prelude::*};

    pub async fn create_pet(
        db: &DatabaseConnection,
        name: String,
        kind: String,
        owner_id: Uuid,
    ) -> Result<pet::Model> {
        let pet_model = pet::ActiveModel {
            name: Set(name),
            kind: Set(kind),
            owner_id: Set(owner_id),
            ..pet::ActiveModel::new()
        };

        let pet = pet_model.insert(db).await?;
        Ok(pet)
    }

    pub async fn get_pet_by_public_id(
        db: &DatabaseConnection,
        pet_id: Uuid,
    ) -> Result<Option<pet::Model>> {
        let pet = Pet::find()
            .filter(pet::Column::PetId.eq(pet_id))
            .one(db)
            .await?;

        Ok(pet)
    }

    pub async fn list_pets(db: &DatabaseConnection) -> Result<Vec<pet::Model>> {
        let pets = Pet::find().all(db).await?;
        Ok(pets)
    }

    pub async fn list_pet_ids_for_owner(
        db: &DatabaseConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Uuid>> {
        let pets = Pet::find()
            .filter(pet::Column::OwnerId.eq(owner_id))
            .all(db)
            .await?;

        Ok(pets.into_iter().map(|pet| pet.pet_id).collect())
    }
}
