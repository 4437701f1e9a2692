//! SeaORM entities for the talent hub schema plus per-entity validation.
//!
//! Every business entity has a surrogate `i64` id, server-assigned
//! timestamps and a nullable `deleted_at` for soft deletes. Pivot entities
//! carry exactly two foreign keys and are never updated.

pub mod errors;
pub mod db;
pub mod compare;
pub mod company;
pub mod candidate;
pub mod skill;
pub mod rating;
pub mod job_listing;
pub mod project;
pub mod candidate_job_listing;
pub mod candidate_project;

pub use compare::{optional_business_eq, BusinessEq};

pub(crate) fn require_text(entity: &str, field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::invalid(entity, &format!("{field} required")));
    }
    Ok(())
}

pub(crate) fn require_id(entity: &str, field: &str, value: i64) -> Result<(), errors::ModelError> {
    if value <= 0 {
        return Err(errors::ModelError::invalid(entity, &format!("{field} must be a positive id")));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
