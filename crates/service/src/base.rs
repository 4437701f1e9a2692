//! Business logic of the stack: validation in front of the repository.
//!
//! `BaseService` knows nothing about principals or logging; the decorators
//! in `authorizing` and `logging` wrap it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::api::{Repository, Service};
use crate::context::CallContext;
use crate::errors::ServiceError;
use crate::pivot::{Pivot, PivotRepository, PivotService};
use crate::resource::Resource;

pub struct BaseService<Repo> {
    repo: Arc<Repo>,
}

impl<Repo> BaseService<Repo> {
    pub fn new(repo: Arc<Repo>) -> Self { Self { repo } }
}

#[async_trait]
impl<R, Repo> Service<R> for BaseService<Repo>
where
    R: Resource,
    Repo: Repository<R>,
{
    #[instrument(skip_all, fields(resource = R::NAME))]
    async fn create(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        R::validate(&record)?;
        self.repo.create(ctx, record).await
    }

    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<R::Record>, ServiceError> {
        self.repo.get(ctx, id).await
    }

    async fn list(&self, ctx: &CallContext, filter: R::Filter) -> Result<Vec<R::Listed>, ServiceError> {
        self.repo.list(ctx, &filter).await
    }

    #[instrument(skip_all, fields(resource = R::NAME, id = R::id(&record)))]
    async fn update(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        if R::id(&record) <= 0 {
            return Err(ServiceError::Validation(format!("{}: id required for update", R::NAME)));
        }
        R::validate(&record)?;
        self.repo.update(ctx, record).await
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        self.repo.delete(ctx, id).await
    }
}

#[async_trait]
impl<P, Repo> PivotService<P> for BaseService<Repo>
where
    P: Pivot,
    Repo: PivotRepository<P>,
{
    #[instrument(skip_all, fields(resource = P::NAME))]
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError> {
        P::validate(&record)?;
        self.repo.create(ctx, record).await
    }

    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError> {
        self.repo.find(ctx, id).await
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        self.repo.delete(ctx, id).await
    }
}
