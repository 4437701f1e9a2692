//! Create `candidate` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Candidate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Candidate::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Candidate::FirstName, 128).not_null())
                    .col(string_len(Candidate::LastName, 128).not_null())
                    .col(string_len(Candidate::Email, 255).unique_key().not_null())
                    .col(ColumnDef::new(Candidate::Headline).string_len(255).null())
                    .col(timestamp_with_time_zone(Candidate::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Candidate::UpdatedAt).not_null())
                    .col(ColumnDef::new(Candidate::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Candidate::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Candidate { Table, Id, FirstName, LastName, Email, Headline, CreatedAt, UpdatedAt, DeletedAt }
