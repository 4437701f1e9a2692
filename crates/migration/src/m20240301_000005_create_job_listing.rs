//! Create `job_listing` table with FK to `company`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobListing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobListing::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobListing::CompanyId).big_integer().not_null())
                    .col(string_len(JobListing::Title, 255).not_null())
                    .col(ColumnDef::new(JobListing::Description).text().null())
                    .col(ColumnDef::new(JobListing::Location).string_len(255).null())
                    .col(timestamp_with_time_zone(JobListing::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(JobListing::UpdatedAt).not_null())
                    .col(ColumnDef::new(JobListing::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_listing_company")
                            .from(JobListing::Table, JobListing::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(JobListing::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum JobListing { Table, Id, CompanyId, Title, Description, Location, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Company { Table, Id }
