//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_company;
mod m20240301_000002_create_candidate;
mod m20240301_000003_create_skill;
mod m20240301_000004_create_rating;
mod m20240301_000005_create_job_listing;
mod m20240301_000006_create_project;
mod m20240301_000007_create_pivots;
mod m20240301_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_company::Migration),
            Box::new(m20240301_000002_create_candidate::Migration),
            Box::new(m20240301_000003_create_skill::Migration),
            Box::new(m20240301_000004_create_rating::Migration),
            Box::new(m20240301_000005_create_job_listing::Migration),
            Box::new(m20240301_000006_create_project::Migration),
            Box::new(m20240301_000007_create_pivots::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}
