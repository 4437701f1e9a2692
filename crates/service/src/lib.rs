//! Talent hub service layer.
//!
//! - `api`/`pivot`: the service and repository capabilities per resource.
//! - `base`: validation in front of storage.
//! - `authorizing`/`logging`: decorators composed around `base` in `stack`.
//! - `repo`: sea-orm storage with injection-safe filter translation.

pub mod errors;
pub mod context;
pub mod auth;
pub mod filters;
pub mod resource;
pub mod api;
pub mod pivot;
pub mod base;
pub mod authorizing;
pub mod logging;
pub mod repo;
pub mod stack;
#[cfg(test)]
pub mod test_support;
#[cfg(test)]
mod tests;

pub use api::{Repository, Service};
pub use context::CallContext;
pub use errors::{Operation, ServiceError};
pub use pivot::{Pivot, PivotService};
pub use resource::Resource;
pub use stack::{build_service, TalentService};
