//! Business resources exposed by the service stack.
//!
//! Each resource is the sea-orm entity type itself; the trait adds what the
//! decorators need to know about it: its name, its access policy, how to
//! find the owner reference of a record or a filter, and how to validate.

use std::fmt::Debug;

use models::errors::ModelError;
use models::{candidate, company, job_listing, project, rating, skill};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Owner;
use crate::auth::policy::{Access, NamedRole, Policy};
use crate::filters::{self, CandidateFilter, CompanyFilter, JobListingFilter, ProjectFilter, RatingFilter, SkillFilter};

pub type Company = company::Entity;
pub type Candidate = candidate::Entity;
pub type Skill = skill::Entity;
pub type Rating = rating::Entity;
pub type JobListing = job_listing::Entity;
pub type Project = project::Entity;

pub trait Resource: Send + Sync + 'static {
    /// Lowercase entity name used in errors and log records.
    const NAME: &'static str;
    const POLICY: Policy;

    type Record: Clone + Debug + Serialize + Send + Sync + 'static;
    /// List element: the record plus its eagerly loaded relations.
    type Listed: Clone + Debug + Serialize + Send + Sync + 'static;
    type Filter: Clone + Debug + Default + Serialize + Send + Sync + 'static;

    fn id(record: &Self::Record) -> i64;

    /// Owner reference of a record. `None` for reference data nobody owns.
    fn owner(record: &Self::Record) -> Option<Owner>;

    /// Owner a list filter restricts results to, through the same column
    /// `owner` reads. Filters reaching rows through a pivot never count.
    fn filter_owner(_filter: &Self::Filter) -> Option<Owner> { None }

    fn validate(record: &Self::Record) -> Result<(), ModelError>;
}

/// A candidate with its live ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWithRatings {
    #[serde(flatten)]
    pub candidate: candidate::Model,
    pub ratings: Vec<rating::Model>,
}

/// A job listing with the company that posted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListingWithCompany {
    #[serde(flatten)]
    pub listing: job_listing::Model,
    pub company: Option<company::Model>,
}

impl Resource for Company {
    const NAME: &'static str = "company";
    const POLICY: Policy = Policy {
        create: Access::Admin,
        get: Access::Public,
        list: Access::Public,
        update: Access::AdminOrOwner,
        delete: Access::AdminOrOwner,
    };
    type Record = company::Model;
    type Listed = company::Model;
    type Filter = CompanyFilter;

    fn id(record: &company::Model) -> i64 { record.id }
    fn owner(record: &company::Model) -> Option<Owner> { Some(Owner::company(record.id)) }
    fn validate(record: &company::Model) -> Result<(), ModelError> { company::validate(record) }
}

impl Resource for Candidate {
    const NAME: &'static str = "candidate";
    const POLICY: Policy = Policy {
        create: Access::AdminOrRole(NamedRole::Candidate),
        get: Access::AdminOrOwner,
        list: Access::Admin,
        update: Access::AdminOrOwner,
        delete: Access::AdminOrOwner,
    };
    type Record = candidate::Model;
    type Listed = CandidateWithRatings;
    type Filter = CandidateFilter;

    fn id(record: &candidate::Model) -> i64 { record.id }
    fn owner(record: &candidate::Model) -> Option<Owner> { Some(Owner::candidate(record.id)) }
    fn validate(record: &candidate::Model) -> Result<(), ModelError> { candidate::validate(record) }
}

impl Resource for Skill {
    const NAME: &'static str = "skill";
    const POLICY: Policy = Policy {
        create: Access::Admin,
        get: Access::Public,
        list: Access::Public,
        update: Access::Admin,
        delete: Access::Admin,
    };
    type Record = skill::Model;
    type Listed = skill::Model;
    type Filter = SkillFilter;

    fn id(record: &skill::Model) -> i64 { record.id }
    fn owner(_record: &skill::Model) -> Option<Owner> { None }
    fn validate(record: &skill::Model) -> Result<(), ModelError> { skill::validate(record) }
}

impl Resource for Rating {
    const NAME: &'static str = "rating";
    const POLICY: Policy = Policy::uniform(Access::AdminOrOwner);
    type Record = rating::Model;
    type Listed = rating::Model;
    type Filter = RatingFilter;

    fn id(record: &rating::Model) -> i64 { record.id }
    fn owner(record: &rating::Model) -> Option<Owner> { Some(Owner::candidate(record.candidate_id)) }
    fn filter_owner(filter: &RatingFilter) -> Option<Owner> { filters::present(filter.candidate_id).map(Owner::candidate) }
    fn validate(record: &rating::Model) -> Result<(), ModelError> { rating::validate(record) }
}

impl Resource for JobListing {
    const NAME: &'static str = "job_listing";
    const POLICY: Policy = Policy {
        create: Access::AdminOrOwner,
        get: Access::Public,
        list: Access::Public,
        update: Access::AdminOrOwner,
        delete: Access::AdminOrOwner,
    };
    type Record = job_listing::Model;
    type Listed = JobListingWithCompany;
    type Filter = JobListingFilter;

    fn id(record: &job_listing::Model) -> i64 { record.id }
    fn owner(record: &job_listing::Model) -> Option<Owner> { Some(Owner::company(record.company_id)) }
    fn filter_owner(filter: &JobListingFilter) -> Option<Owner> { filters::present(filter.company_id).map(Owner::company) }
    fn validate(record: &job_listing::Model) -> Result<(), ModelError> { job_listing::validate(record) }
}

impl Resource for Project {
    const NAME: &'static str = "project";
    const POLICY: Policy = Policy::uniform(Access::AdminOrOwner);
    type Record = project::Model;
    type Listed = project::Model;
    type Filter = ProjectFilter;

    fn id(record: &project::Model) -> i64 { record.id }
    fn owner(record: &project::Model) -> Option<Owner> { Some(Owner::candidate(record.candidate_id)) }
    fn filter_owner(filter: &ProjectFilter) -> Option<Owner> { filters::present(filter.owner_id).map(Owner::candidate) }
    fn validate(record: &project::Model) -> Result<(), ModelError> { project::validate(record) }
}
