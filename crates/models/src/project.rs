use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{candidate, errors, require_id, require_text, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Candidate,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Candidate => Entity::belongs_to(candidate::Entity)
                .from(Column::CandidateId)
                .to(candidate::Column::Id)
                .into(),
        }
    }
}

impl Related<candidate::Entity> for Entity {
    fn to() -> RelationDef { Relation::Candidate.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_id("project", "candidate_id", m.candidate_id)?;
    require_text("project", "name", &m.name)
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id
            && self.name == other.name
            && self.description == other.description
            && self.url == other.url
    }
}
