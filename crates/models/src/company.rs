use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, job_listing, require_text, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    JobListing,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::JobListing => Entity::has_many(job_listing::Entity).into(),
        }
    }
}

impl Related<job_listing::Entity> for Entity {
    fn to() -> RelationDef { Relation::JobListing.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_text("company", "name", &m.name)?;
    if let Some(site) = &m.website {
        if !(site.starts_with("http://") || site.starts_with("https://")) {
            return Err(errors::ModelError::invalid("company", "website must start with http(s)"));
        }
    }
    Ok(())
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.website == other.website
    }
}
