//! Create `skill` reference table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skill::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Skill::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Skill::Name, 128).unique_key().not_null())
                    .col(timestamp_with_time_zone(Skill::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Skill::UpdatedAt).not_null())
                    .col(ColumnDef::new(Skill::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Skill::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Skill { Table, Id, Name, CreatedAt, UpdatedAt, DeletedAt }
