//! Create the N:M pivot tables `candidate_job_listing` and `candidate_project`.
//!
//! Pivot rows carry their own surrogate id and two foreign keys. They are
//! never updated; duplicates of the same pair are not prevented here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CandidateJobListing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CandidateJobListing::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CandidateJobListing::CandidateId).big_integer().not_null())
                    .col(ColumnDef::new(CandidateJobListing::JobListingId).big_integer().not_null())
                    .col(timestamp_with_time_zone(CandidateJobListing::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cjl_candidate")
                            .from(CandidateJobListing::Table, CandidateJobListing::CandidateId)
                            .to(Candidate::Table, Candidate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cjl_job_listing")
                            .from(CandidateJobListing::Table, CandidateJobListing::JobListingId)
                            .to(JobListing::Table, JobListing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CandidateProject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CandidateProject::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CandidateProject::CandidateId).big_integer().not_null())
                    .col(ColumnDef::new(CandidateProject::ProjectId).big_integer().not_null())
                    .col(timestamp_with_time_zone(CandidateProject::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cp_candidate")
                            .from(CandidateProject::Table, CandidateProject::CandidateId)
                            .to(Candidate::Table, Candidate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cp_project")
                            .from(CandidateProject::Table, CandidateProject::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CandidateProject::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CandidateJobListing::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CandidateJobListing { Table, Id, CandidateId, JobListingId, CreatedAt }

#[derive(DeriveIden)]
enum CandidateProject { Table, Id, CandidateId, ProjectId, CreatedAt }

#[derive(DeriveIden)]
enum Candidate { Table, Id }

#[derive(DeriveIden)]
enum JobListing { Table, Id }

#[derive(DeriveIden)]
enum Project { Table, Id }
