use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{candidate, errors, require_id, skill, BusinessEq};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub skill_id: i64,
    pub score: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Candidate,
    Skill,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Candidate => Entity::belongs_to(candidate::Entity)
                .from(Column::CandidateId)
                .to(candidate::Column::Id)
                .into(),
            Relation::Skill => Entity::belongs_to(skill::Entity)
                .from(Column::SkillId)
                .to(skill::Column::Id)
                .into(),
        }
    }
}

impl Related<candidate::Entity> for Entity {
    fn to() -> RelationDef { Relation::Candidate.def() }
}

impl Related<skill::Entity> for Entity {
    fn to() -> RelationDef { Relation::Skill.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_id("rating", "candidate_id", m.candidate_id)?;
    require_id("rating", "skill_id", m.skill_id)?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&m.score) {
        return Err(errors::ModelError::invalid("rating", "score must be within 1..=5"));
    }
    Ok(())
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id && self.skill_id == other.skill_id && self.score == other.score
    }
}
