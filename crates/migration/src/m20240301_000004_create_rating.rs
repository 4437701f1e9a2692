//! Create `rating` table with FKs to `candidate` and `skill`.
//!
//! A rating is a candidate's self-assessed score for one skill.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rating::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rating::CandidateId).big_integer().not_null())
                    .col(ColumnDef::new(Rating::SkillId).big_integer().not_null())
                    .col(integer(Rating::Score).not_null())
                    .col(timestamp_with_time_zone(Rating::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Rating::UpdatedAt).not_null())
                    .col(ColumnDef::new(Rating::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_candidate")
                            .from(Rating::Table, Rating::CandidateId)
                            .to(Candidate::Table, Candidate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_skill")
                            .from(Rating::Table, Rating::SkillId)
                            .to(Skill::Table, Skill::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Rating::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Rating { Table, Id, CandidateId, SkillId, Score, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Candidate { Table, Id }

#[derive(DeriveIden)]
enum Skill { Table, Id }
