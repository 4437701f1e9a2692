#![cfg(test)]
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use models::db::{connect_with_config, DatabaseConfig};

use crate::context::CallContext;

/// Fresh in-memory database with every migration applied. Each call gets its
/// own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Token as the upstream gateway would forward it. The signing key is
/// irrelevant: signatures are not checked downstream.
pub fn token(claims: &Value) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(b"upstream")).expect("encode test token")
}

pub fn ctx_for(identity: u64, roles: &[&str]) -> CallContext {
    let cfg = configs::AuthConfig::default();
    let claims = json!({
        cfg.identity_claim.clone(): identity.to_string(),
        cfg.roles_claim.clone(): roles,
    });
    CallContext::new().with_bearer(&token(&claims))
}

/// Principal whose identity is a company id.
pub fn company_ctx(company: u64, roles: &[&str]) -> CallContext {
    let cfg = configs::AuthConfig::default();
    let claims = json!({
        cfg.identity_claim.clone(): company.to_string(),
        cfg.roles_claim.clone(): roles,
        cfg.owner_kind_claim.clone(): "company",
    });
    CallContext::new().with_bearer(&token(&claims))
}

pub fn admin() -> CallContext { ctx_for(1, &["Admin"]) }

pub fn anonymous() -> CallContext { CallContext::new() }

/// Input records as a caller would send them: no id, placeholder timestamps.
pub mod records {
    use chrono::Utc;
    use models::{candidate, candidate_job_listing, candidate_project, company, job_listing, project, rating, skill};
    use sea_orm::prelude::DateTimeWithTimeZone;

    fn ts() -> DateTimeWithTimeZone { Utc::now().fixed_offset() }

    pub fn company(name: &str) -> company::Model {
        company::Model { id: 0, name: name.into(), website: None, created_at: ts(), updated_at: ts(), deleted_at: None }
    }

    pub fn candidate(first: &str, last: &str, email: &str) -> candidate::Model {
        candidate::Model {
            id: 0,
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            headline: None,
            created_at: ts(),
            updated_at: ts(),
            deleted_at: None,
        }
    }

    pub fn skill(name: &str) -> skill::Model {
        skill::Model { id: 0, name: name.into(), created_at: ts(), updated_at: ts(), deleted_at: None }
    }

    pub fn rating(candidate_id: i64, skill_id: i64, score: i32) -> rating::Model {
        rating::Model { id: 0, candidate_id, skill_id, score, created_at: ts(), updated_at: ts(), deleted_at: None }
    }

    pub fn job_listing(company_id: i64, title: &str) -> job_listing::Model {
        job_listing::Model {
            id: 0,
            company_id,
            title: title.into(),
            description: None,
            location: None,
            created_at: ts(),
            updated_at: ts(),
            deleted_at: None,
        }
    }

    pub fn project(candidate_id: i64, name: &str) -> project::Model {
        project::Model {
            id: 0,
            candidate_id,
            name: name.into(),
            description: None,
            url: None,
            created_at: ts(),
            updated_at: ts(),
            deleted_at: None,
        }
    }

    pub fn candidate_job_listing(candidate_id: i64, job_listing_id: i64) -> candidate_job_listing::Model {
        candidate_job_listing::Model { id: 0, candidate_id, job_listing_id, created_at: ts() }
    }

    pub fn candidate_project(candidate_id: i64, project_id: i64) -> candidate_project::Model {
        candidate_project::Model { id: 0, candidate_id, project_id, created_at: ts() }
    }
}
