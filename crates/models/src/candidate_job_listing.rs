//! Pivot: candidate applied to / is associated with a job listing.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{candidate, errors, job_listing, require_id, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "candidate_job_listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub job_listing_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Candidate,
    JobListing,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Candidate => Entity::belongs_to(candidate::Entity)
                .from(Column::CandidateId)
                .to(candidate::Column::Id)
                .into(),
            Relation::JobListing => Entity::belongs_to(job_listing::Entity)
                .from(Column::JobListingId)
                .to(job_listing::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_id("candidate_job_listing", "candidate_id", m.candidate_id)?;
    require_id("candidate_job_listing", "job_listing_id", m.job_listing_id)
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id && self.job_listing_id == other.job_listing_id
    }
}
