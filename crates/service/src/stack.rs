//! Composition of the full service stack.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::auth::{JwtClaimsResolver, RoleNames};
use crate::authorizing::AuthorizingService;
use crate::base::BaseService;
use crate::logging::LoggingService;
use crate::repo::SeaOrmRepository;

/// Every resource and pivot, logged, then authorized, then validated and stored.
pub type TalentService = LoggingService<AuthorizingService<BaseService<SeaOrmRepository>>>;

/// # Examples
/// ```
/// use migration::MigratorTrait;
/// use service::resource::Skill;
/// use service::{build_service, CallContext, Service};
///
/// let skills = tokio_test::block_on(async {
///     let db = models::db::connect_with_config(&configs::DatabaseConfig::in_memory_sqlite()).await?;
///     migration::Migrator::up(&db, None).await?;
///     let svc = build_service(db, &configs::AuthConfig::default());
///     // listing skills is public, no credentials needed
///     Ok::<_, anyhow::Error>(Service::<Skill>::list(&svc, &CallContext::new(), Default::default()).await?)
/// })
/// .unwrap();
/// assert!(skills.is_empty());
/// ```
pub fn build_service(db: DatabaseConnection, auth: &configs::AuthConfig) -> TalentService {
    let repo = Arc::new(SeaOrmRepository::new(db));
    let resolver = Arc::new(JwtClaimsResolver::new(auth));
    let stack = LoggingService::new(AuthorizingService::new(
        BaseService::new(repo),
        resolver,
        RoleNames::from_config(auth),
    ));
    info!(admin_role = %auth.admin_role, "service stack composed");
    stack
}
