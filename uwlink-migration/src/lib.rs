pub use sea_orm_migration::prelude::*;

mod m20240304_000001_create_owners_table;
mod m20240305_000001_create_pets_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240304_000001_create_owners_table::Migration),
            Box::new(m20240305_000001_create_pets_table::Migration),
        ]
    }
}
