//! Pivot: candidate contributed to a project.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{candidate, errors, project, require_id, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "candidate_project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub project_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Candidate,
    Project,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Candidate => Entity::belongs_to(candidate::Entity)
                .from(Column::CandidateId)
                .to(candidate::Column::Id)
                .into(),
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_id("candidate_project", "candidate_id", m.candidate_id)?;
    require_id("candidate_project", "project_id", m.project_id)
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id && self.project_id == other.project_id
    }
}
