//! Pivot associations: rows linking two entities by their foreign keys.
//!
//! A pivot row can be created, read by its own id and deleted. Nothing
//! updates one, so both keys stay what they were at creation.

use std::fmt::Debug;

use async_trait::async_trait;
use models::errors::ModelError;
use models::{candidate_job_listing, candidate_project};
use serde::Serialize;

use crate::auth::claims::Owner;
use crate::auth::policy::{Access, PivotPolicy};
use crate::context::CallContext;
use crate::errors::ServiceError;

pub type CandidateJobListing = candidate_job_listing::Entity;
pub type CandidateProject = candidate_project::Entity;

pub trait Pivot: Send + Sync + 'static {
    const NAME: &'static str;
    const POLICY: PivotPolicy;

    type Record: Clone + Debug + Serialize + Send + Sync + 'static;

    fn id(record: &Self::Record) -> i64;

    /// `(owner, target)`: the left key is the owning side.
    fn keys(record: &Self::Record) -> (i64, i64);

    /// The owning side as an owner reference. Linking a target grants no
    /// access to it.
    fn owner(record: &Self::Record) -> Owner;

    fn validate(record: &Self::Record) -> Result<(), ModelError>;
}

const OWNER_ONLY: PivotPolicy = PivotPolicy {
    create: Access::AdminOrOwner,
    find: Access::AdminOrOwner,
    delete: Access::AdminOrOwner,
};

impl Pivot for CandidateJobListing {
    const NAME: &'static str = "candidate_job_listing";
    const POLICY: PivotPolicy = OWNER_ONLY;
    type Record = candidate_job_listing::Model;

    fn id(record: &candidate_job_listing::Model) -> i64 { record.id }
    fn keys(record: &candidate_job_listing::Model) -> (i64, i64) { (record.candidate_id, record.job_listing_id) }
    fn owner(record: &candidate_job_listing::Model) -> Owner { Owner::candidate(record.candidate_id) }
    fn validate(record: &candidate_job_listing::Model) -> Result<(), ModelError> { candidate_job_listing::validate(record) }
}

impl Pivot for CandidateProject {
    const NAME: &'static str = "candidate_project";
    const POLICY: PivotPolicy = OWNER_ONLY;
    type Record = candidate_project::Model;

    fn id(record: &candidate_project::Model) -> i64 { record.id }
    fn keys(record: &candidate_project::Model) -> (i64, i64) { (record.candidate_id, record.project_id) }
    fn owner(record: &candidate_project::Model) -> Owner { Owner::candidate(record.candidate_id) }
    fn validate(record: &candidate_project::Model) -> Result<(), ModelError> { candidate_project::validate(record) }
}

#[async_trait]
pub trait PivotService<P: Pivot>: Send + Sync {
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError>;
    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError>;
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait PivotRepository<P: Pivot>: Send + Sync {
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError>;
    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError>;
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError>;
}
