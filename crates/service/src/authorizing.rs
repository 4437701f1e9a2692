//! Authorization decorator.
//!
//! Wraps any service and enforces the static policy of each resource before
//! forwarding. Ownership is computed only when roles alone do not grant the
//! call, and for updates and deletes it is always taken from the stored row,
//! never from what the caller sent. Anything that cannot be proven owned is
//! refused.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::api::Service;
use crate::auth::claims::{Claims, ClaimsResolver, Owner};
use crate::auth::policy::{Access, RoleNames};
use crate::context::CallContext;
use crate::errors::{Operation, ServiceError};
use crate::pivot::{Pivot, PivotService};
use crate::resource::Resource;

pub struct AuthorizingService<S> {
    inner: S,
    resolver: Arc<dyn ClaimsResolver>,
    roles: RoleNames,
}

enum Gate {
    Granted,
    NeedsOwner(Claims),
}

impl<S> AuthorizingService<S> {
    pub fn new(inner: S, resolver: Arc<dyn ClaimsResolver>, roles: RoleNames) -> Self {
        Self { inner, resolver, roles }
    }

    fn gate(&self, ctx: &CallContext, access: Access, op: Operation, resource: &'static str) -> Result<Gate, ServiceError> {
        if access == Access::Public {
            return Ok(Gate::Granted);
        }
        let claims = self.resolver.resolve(ctx)?;
        if self.roles.granted_by_role(access, &claims) {
            return Ok(Gate::Granted);
        }
        if access.accepts_owner() {
            return Ok(Gate::NeedsOwner(claims));
        }
        warn!(resource, operation = %op, subject_id = claims.subject_id, "access denied: role required");
        Err(ServiceError::forbidden(op, resource))
    }
}

fn ensure_owner(claims: &Claims, owner: Option<Owner>, op: Operation, resource: &'static str) -> Result<(), ServiceError> {
    if claims.owns(owner) {
        return Ok(());
    }
    warn!(
        resource,
        operation = %op,
        subject_id = claims.subject_id,
        owned_kind = claims.owned_kind.as_str(),
        owner = ?owner,
        "access denied: not owner"
    );
    Err(ServiceError::forbidden(op, resource))
}

#[async_trait]
impl<R, S> Service<R> for AuthorizingService<S>
where
    R: Resource,
    S: Service<R>,
{
    async fn create(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        let op = Operation::Create;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, R::POLICY.rule(op), op, R::NAME)? {
            ensure_owner(&claims, R::owner(&record), op, R::NAME)?;
        }
        self.inner.create(ctx, record).await
    }

    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<R::Record>, ServiceError> {
        let op = Operation::Get;
        match self.gate(ctx, R::POLICY.rule(op), op, R::NAME)? {
            Gate::Granted => self.inner.get(ctx, id).await,
            Gate::NeedsOwner(claims) => {
                let found = self.inner.get(ctx, id).await?;
                ensure_owner(&claims, found.as_ref().and_then(R::owner), op, R::NAME)?;
                Ok(found)
            }
        }
    }

    async fn list(&self, ctx: &CallContext, filter: R::Filter) -> Result<Vec<R::Listed>, ServiceError> {
        let op = Operation::List;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, R::POLICY.rule(op), op, R::NAME)? {
            ensure_owner(&claims, R::filter_owner(&filter), op, R::NAME)?;
        }
        self.inner.list(ctx, filter).await
    }

    async fn update(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        let op = Operation::Update;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, R::POLICY.rule(op), op, R::NAME)? {
            let stored = self.inner.get(ctx, R::id(&record)).await?;
            ensure_owner(&claims, stored.as_ref().and_then(R::owner), op, R::NAME)?;
        }
        self.inner.update(ctx, record).await
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        let op = Operation::Delete;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, R::POLICY.rule(op), op, R::NAME)? {
            let stored = self.inner.get(ctx, id).await?;
            ensure_owner(&claims, stored.as_ref().and_then(R::owner), op, R::NAME)?;
        }
        self.inner.delete(ctx, id).await
    }
}

#[async_trait]
impl<P, S> PivotService<P> for AuthorizingService<S>
where
    P: Pivot,
    S: PivotService<P>,
{
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError> {
        let op = Operation::Create;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, P::POLICY.create, op, P::NAME)? {
            ensure_owner(&claims, Some(P::owner(&record)), op, P::NAME)?;
        }
        self.inner.create(ctx, record).await
    }

    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError> {
        let op = Operation::Get;
        match self.gate(ctx, P::POLICY.find, op, P::NAME)? {
            Gate::Granted => self.inner.find(ctx, id).await,
            Gate::NeedsOwner(claims) => {
                let found = self.inner.find(ctx, id).await?;
                ensure_owner(&claims, found.as_ref().map(P::owner), op, P::NAME)?;
                Ok(found)
            }
        }
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        let op = Operation::Delete;
        if let Gate::NeedsOwner(claims) = self.gate(ctx, P::POLICY.delete, op, P::NAME)? {
            let stored = self.inner.find(ctx, id).await?;
            ensure_owner(&claims, stored.as_ref().map(P::owner), op, P::NAME)?;
        }
        self.inner.delete(ctx, id).await
    }
}
