//! List filters. Every field is optional; a present field narrows the result.
//!
//! "Present" means a non-empty id list, a non-zero id or a non-blank string.
//! Fields named after another entity's id (`job_listing_id` on candidates,
//! `candidate_id` on job listings and projects) resolve through a pivot table.
//! `owner_id` on projects matches the owning `candidate_id` column.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyFilter {
    pub ids: Vec<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    pub ids: Vec<i64>,
    /// Matches first or last name.
    pub name: Option<String>,
    pub job_listing_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillFilter {
    pub ids: Vec<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingFilter {
    pub ids: Vec<i64>,
    pub candidate_id: Option<i64>,
    pub skill_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListingFilter {
    pub ids: Vec<i64>,
    pub title: Option<String>,
    pub company_id: Option<i64>,
    pub candidate_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilter {
    pub ids: Vec<i64>,
    pub name: Option<String>,
    pub owner_id: Option<i64>,
    pub candidate_id: Option<i64>,
}

/// A referenced id counts only when present and non-zero.
pub(crate) fn present(id: Option<i64>) -> Option<i64> { id.filter(|id| *id != 0) }
