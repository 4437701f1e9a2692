//! The service capability and the repository capability it is built on.
//!
//! Both traits are generic over the resource, so one value (a repository,
//! a decorator) implements them for every resource it supports. Call sites
//! that hold such a value name the resource explicitly:
//!
//! ```ignore
//! let found = Service::<Candidate>::get(&svc, &ctx, 12).await?;
//! ```

use async_trait::async_trait;

use crate::context::CallContext;
use crate::errors::ServiceError;
use crate::resource::Resource;

/// CRUD operations of one resource as seen by callers.
#[async_trait]
pub trait Service<R: Resource>: Send + Sync {
    async fn create(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError>;
    /// `Ok(None)` when no live row has this id.
    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<R::Record>, ServiceError>;
    async fn list(&self, ctx: &CallContext, filter: R::Filter) -> Result<Vec<R::Listed>, ServiceError>;
    async fn update(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError>;
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError>;
}

/// Storage access for one resource.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    async fn create(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError>;
    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<R::Record>, ServiceError>;
    async fn list(&self, ctx: &CallContext, filter: &R::Filter) -> Result<Vec<R::Listed>, ServiceError>;
    /// Rejects a record whose owner reference differs from the stored one.
    async fn update(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError>;
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError>;
}
