//! Logging decorator: one structured event per call, result untouched.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::Service;
use crate::context::CallContext;
use crate::errors::ServiceError;
use crate::pivot::{Pivot, PivotService};
use crate::resource::Resource;

pub struct LoggingService<S> {
    inner: S,
}

impl<S> LoggingService<S> {
    pub fn new(inner: S) -> Self { Self { inner } }
}

fn render<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

async fn observe<T, F>(method: &'static str, resource: &'static str, input: String, call: F) -> Result<T, ServiceError>
where
    T: Serialize,
    F: Future<Output = Result<T, ServiceError>>,
{
    let started = Instant::now();
    let result = call.await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(output) => info!(method, resource, input = %input, output = %render(output), elapsed_ms, "service call"),
        Err(error) => warn!(method, resource, input = %input, error = %error, code = error.code(), elapsed_ms, "service call failed"),
    }
    result
}

#[async_trait]
impl<R, S> Service<R> for LoggingService<S>
where
    R: Resource,
    S: Service<R>,
{
    async fn create(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        observe("create", R::NAME, render(&record), self.inner.create(ctx, record)).await
    }

    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<R::Record>, ServiceError> {
        observe("get", R::NAME, id.to_string(), self.inner.get(ctx, id)).await
    }

    async fn list(&self, ctx: &CallContext, filter: R::Filter) -> Result<Vec<R::Listed>, ServiceError> {
        observe("list", R::NAME, render(&filter), self.inner.list(ctx, filter)).await
    }

    async fn update(&self, ctx: &CallContext, record: R::Record) -> Result<R::Record, ServiceError> {
        observe("update", R::NAME, render(&record), self.inner.update(ctx, record)).await
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        observe("delete", R::NAME, id.to_string(), self.inner.delete(ctx, id)).await
    }
}

#[async_trait]
impl<P, S> PivotService<P> for LoggingService<S>
where
    P: Pivot,
    S: PivotService<P>,
{
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError> {
        observe("create", P::NAME, render(&record), self.inner.create(ctx, record)).await
    }

    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError> {
        observe("find", P::NAME, id.to_string(), self.inner.find(ctx, id)).await
    }

    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        observe("delete", P::NAME, id.to_string(), self.inner.delete(ctx, id)).await
    }
}
