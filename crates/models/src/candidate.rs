use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, rating, require_text, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "candidate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub headline: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Rating,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Rating => Entity::has_many(rating::Entity).into(),
        }
    }
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rating.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(errors::ModelError::invalid("candidate", "invalid email")),
    }
}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_text("candidate", "first_name", &m.first_name)?;
    require_text("candidate", "last_name", &m.last_name)?;
    validate_email(&m.email)
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
            && self.headline == other.headline
    }
}
