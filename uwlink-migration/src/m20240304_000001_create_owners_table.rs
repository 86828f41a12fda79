use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Owners::OwnerId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Owners::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Owners::HashedPassword).string().not_null())
                    .col(
                        ColumnDef::new(Owners::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on owner_id for lookups by public id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-owners-owner_id")
                    .table(Owners::Table)
                    .col(Owners::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Create index on username for login lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-owners-username")
                    .table(Owners::Table)
                    .col(Owners::Username)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Owners {
    Table,
    Id,
    OwnerId,
    Username,
    HashedPassword,
    JoinedAt,
}
