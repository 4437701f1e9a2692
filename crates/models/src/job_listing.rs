use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{company, errors, require_id, require_text, BusinessEq};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(m: &Model) -> Result<(), errors::ModelError> {
    require_id("job_listing", "company_id", m.company_id)?;
    require_text("job_listing", "title", &m.title)
}

impl BusinessEq for Model {
    fn business_eq(&self, other: &Self) -> bool {
        self.company_id == other.company_id
            && self.title == other.title
            && self.description == other.description
            && self.location == other.location
    }
}
