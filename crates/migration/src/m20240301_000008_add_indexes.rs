//! Lookup indexes for owner references and pivot keys. Applied last.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_candidate")
                    .table(Rating::Table)
                    .col(Rating::CandidateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_job_listing_company")
                    .table(JobListing::Table)
                    .col(JobListing::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_candidate")
                    .table(Project::Table)
                    .col(Project::CandidateId)
                    .to_owned(),
            )
            .await?;

        // Pivot lookups always start from the candidate side.
        manager
            .create_index(
                Index::create()
                    .name("idx_cjl_candidate")
                    .table(CandidateJobListing::Table)
                    .col(CandidateJobListing::CandidateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cp_candidate")
                    .table(CandidateProject::Table)
                    .col(CandidateProject::CandidateId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cp_candidate").table(CandidateProject::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cjl_candidate").table(CandidateJobListing::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_candidate").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_listing_company").table(JobListing::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rating_candidate").table(Rating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rating { Table, CandidateId }

#[derive(DeriveIden)]
enum JobListing { Table, CompanyId }

#[derive(DeriveIden)]
enum Project { Table, CandidateId }

#[derive(DeriveIden)]
enum CandidateJobListing { Table, CandidateId }

#[derive(DeriveIden)]
enum CandidateProject { Table, CandidateId }
