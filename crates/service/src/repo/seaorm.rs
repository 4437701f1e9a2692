use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, info, instrument};

use models::{candidate, candidate_job_listing, candidate_project, company, job_listing, project, rating, skill};

use crate::api::Repository;
use crate::context::CallContext;
use crate::errors::{Operation, ServiceError};
use crate::filters::{present, CandidateFilter, CompanyFilter, JobListingFilter, ProjectFilter, RatingFilter, SkillFilter};
use crate::pivot::{Pivot, PivotRepository};
use crate::repo::filter::PredicateBuilder;
use crate::repo::stored::{Mutable, Stored};
use crate::resource::{CandidateWithRatings, JobListingWithCompany, Resource};

/// SeaORM-backed repository for every resource and pivot.
pub struct SeaOrmRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub fn connection(&self) -> &DatabaseConnection { &self.db }
}

fn now() -> DateTimeWithTimeZone { Utc::now().fixed_offset() }

fn storage(op: Operation, resource: &'static str, id: Option<i64>) -> impl Fn(DbErr) -> ServiceError {
    move |e| ServiceError::storage(op, resource, id, e)
}

async fn find_live<E: Mutable>(db: &DatabaseConnection, id: i64) -> Result<Option<E::Model>, DbErr> {
    E::find()
        .filter(E::id_col().eq(id))
        .filter(E::deleted_col().is_null())
        .one(db)
        .await
}

/// `SELECT select_col FROM pivot WHERE match_col = value`
async fn pivot_ids<P: EntityTrait>(
    db: &DatabaseConnection,
    match_col: P::Column,
    value: i64,
    select_col: P::Column,
) -> Result<Vec<i64>, DbErr> {
    P::find()
        .select_only()
        .column(select_col)
        .filter(match_col.eq(value))
        .into_tuple::<i64>()
        .all(db)
        .await
}

/// Per-resource list query: filter translation plus eager loading.
#[async_trait]
pub trait Lister<E: Resource>: Send + Sync {
    async fn list_rows(&self, ctx: &CallContext, filter: &E::Filter) -> Result<Vec<E::Listed>, ServiceError>;
}

#[async_trait]
impl<E> Repository<E> for SeaOrmRepository
where
    E: Mutable + Resource<Record = <E as EntityTrait>::Model>,
    <E as EntityTrait>::Model: IntoActiveModel<<E as Stored>::Active> + Sync,
    Self: Lister<E>,
{
    #[instrument(skip_all, fields(resource = E::NAME))]
    async fn create(&self, ctx: &CallContext, record: <E as Resource>::Record) -> Result<<E as Resource>::Record, ServiceError> {
        ctx.ensure_active()?;
        let created = E::for_insert(record, now())
            .insert(&self.db)
            .await
            .map_err(storage(Operation::Create, E::NAME, None))?;
        info!(resource = E::NAME, id = <E as Resource>::id(&created), "created");
        Ok(created)
    }

    async fn get(&self, ctx: &CallContext, id: i64) -> Result<Option<<E as Resource>::Record>, ServiceError> {
        ctx.ensure_active()?;
        find_live::<E>(&self.db, id).await.map_err(storage(Operation::Get, E::NAME, Some(id)))
    }

    async fn list(&self, ctx: &CallContext, filter: &E::Filter) -> Result<Vec<E::Listed>, ServiceError> {
        let rows = <Self as Lister<E>>::list_rows(self, ctx, filter).await?;
        debug!(resource = E::NAME, count = rows.len(), "listed");
        Ok(rows)
    }

    /// The stored owner is part of the `WHERE` clause, so a record naming a
    /// different owner updates nothing and is reported as a validation error.
    #[instrument(skip_all, fields(resource = E::NAME, id = <E as Resource>::id(&record)))]
    async fn update(&self, ctx: &CallContext, record: <E as Resource>::Record) -> Result<<E as Resource>::Record, ServiceError> {
        ctx.ensure_active()?;
        let id = <E as Resource>::id(&record);
        let owner = <E as Resource>::owner(&record).map(|o| o.id);
        let err = storage(Operation::Update, E::NAME, Some(id));

        let mut query = E::update_many()
            .set(E::for_update(record, now()))
            .filter(E::id_col().eq(id))
            .filter(E::deleted_col().is_null());
        if let (Some(col), Some(owner)) = (E::owner_col(), owner) {
            query = query.filter(col.eq(owner));
        }
        let res = query.exec(&self.db).await.map_err(&err)?;

        // committed: report it whatever the token says
        let current = find_live::<E>(&self.db, id).await.map_err(&err)?;
        match (res.rows_affected, current) {
            (0, Some(_)) => Err(ServiceError::Validation(format!("{}: owner reference cannot be reassigned", E::NAME))),
            (n, Some(updated)) if n > 0 => {
                info!(resource = E::NAME, id, "updated");
                Ok(updated)
            }
            _ => Err(ServiceError::zero_rows(Operation::Update, E::NAME, id)),
        }
    }

    #[instrument(skip_all, fields(resource = E::NAME, id = id))]
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        ctx.ensure_active()?;
        let res = E::update_many()
            .col_expr(E::deleted_col(), Expr::value(now()))
            .filter(E::id_col().eq(id))
            .filter(E::deleted_col().is_null())
            .exec(&self.db)
            .await
            .map_err(storage(Operation::Delete, E::NAME, Some(id)))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::zero_rows(Operation::Delete, E::NAME, id));
        }
        info!(resource = E::NAME, id, "deleted");
        Ok(())
    }
}

#[async_trait]
impl<P> PivotRepository<P> for SeaOrmRepository
where
    P: Stored + Pivot<Record = <P as EntityTrait>::Model>,
    <P as EntityTrait>::Model: IntoActiveModel<<P as Stored>::Active> + Sync,
{
    #[instrument(skip_all, fields(resource = P::NAME))]
    async fn create(&self, ctx: &CallContext, record: P::Record) -> Result<P::Record, ServiceError> {
        ctx.ensure_active()?;
        let created = P::for_insert(record, now())
            .insert(&self.db)
            .await
            .map_err(storage(Operation::Create, P::NAME, None))?;
        let (owner, target) = P::keys(&created);
        info!(resource = P::NAME, id = P::id(&created), owner, target, "associated");
        Ok(created)
    }

    async fn find(&self, ctx: &CallContext, id: i64) -> Result<Option<P::Record>, ServiceError> {
        ctx.ensure_active()?;
        P::find()
            .filter(P::id_col().eq(id))
            .one(&self.db)
            .await
            .map_err(storage(Operation::Get, P::NAME, Some(id)))
    }

    /// Pivot rows are removed outright; nothing references them.
    #[instrument(skip_all, fields(resource = P::NAME, id = id))]
    async fn delete(&self, ctx: &CallContext, id: i64) -> Result<(), ServiceError> {
        ctx.ensure_active()?;
        let res = P::delete_many()
            .filter(P::id_col().eq(id))
            .exec(&self.db)
            .await
            .map_err(storage(Operation::Delete, P::NAME, Some(id)))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::zero_rows(Operation::Delete, P::NAME, id));
        }
        info!(resource = P::NAME, id, "dissociated");
        Ok(())
    }
}

#[async_trait]
impl Lister<company::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &CompanyFilter) -> Result<Vec<company::Model>, ServiceError> {
        let cond = PredicateBuilder::<company::Entity>::new(company::Column::Id)
            .ids(&f.ids)
            .contains(&[company::Column::Name], f.name.as_deref())
            .live(company::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        company::Entity::find()
            .filter(cond)
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage(Operation::List, "company", None))
    }
}

#[async_trait]
impl Lister<candidate::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &CandidateFilter) -> Result<Vec<CandidateWithRatings>, ServiceError> {
        let err = storage(Operation::List, "candidate", None);
        let resolved = match present(f.job_listing_id) {
            Some(listing) => {
                ctx.ensure_active()?;
                let ids = pivot_ids::<candidate_job_listing::Entity>(
                    &self.db,
                    candidate_job_listing::Column::JobListingId,
                    listing,
                    candidate_job_listing::Column::CandidateId,
                )
                .await
                .map_err(&err)?;
                Some(ids)
            }
            None => None,
        };
        let cond = PredicateBuilder::<candidate::Entity>::new(candidate::Column::Id)
            .ids(&f.ids)
            .contains(&[candidate::Column::FirstName, candidate::Column::LastName], f.name.as_deref())
            .pivot(resolved.as_deref())
            .live(candidate::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        let rows = candidate::Entity::find()
            .filter(cond)
            .order_by_asc(candidate::Column::Id)
            .find_with_related(rating::Entity)
            .all(&self.db)
            .await
            .map_err(&err)?;
        Ok(rows
            .into_iter()
            .map(|(candidate, ratings)| CandidateWithRatings {
                candidate,
                ratings: ratings.into_iter().filter(|r| r.deleted_at.is_none()).collect(),
            })
            .collect())
    }
}

#[async_trait]
impl Lister<skill::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &SkillFilter) -> Result<Vec<skill::Model>, ServiceError> {
        let cond = PredicateBuilder::<skill::Entity>::new(skill::Column::Id)
            .ids(&f.ids)
            .contains(&[skill::Column::Name], f.name.as_deref())
            .live(skill::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        skill::Entity::find()
            .filter(cond)
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage(Operation::List, "skill", None))
    }
}

#[async_trait]
impl Lister<rating::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &RatingFilter) -> Result<Vec<rating::Model>, ServiceError> {
        let cond = PredicateBuilder::<rating::Entity>::new(rating::Column::Id)
            .ids(&f.ids)
            .eq(rating::Column::CandidateId, f.candidate_id)
            .eq(rating::Column::SkillId, f.skill_id)
            .live(rating::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        rating::Entity::find()
            .filter(cond)
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage(Operation::List, "rating", None))
    }
}

#[async_trait]
impl Lister<job_listing::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &JobListingFilter) -> Result<Vec<JobListingWithCompany>, ServiceError> {
        let err = storage(Operation::List, "job_listing", None);
        let resolved = match present(f.candidate_id) {
            Some(candidate) => {
                ctx.ensure_active()?;
                let ids = pivot_ids::<candidate_job_listing::Entity>(
                    &self.db,
                    candidate_job_listing::Column::CandidateId,
                    candidate,
                    candidate_job_listing::Column::JobListingId,
                )
                .await
                .map_err(&err)?;
                Some(ids)
            }
            None => None,
        };
        let cond = PredicateBuilder::<job_listing::Entity>::new(job_listing::Column::Id)
            .ids(&f.ids)
            .contains(&[job_listing::Column::Title], f.title.as_deref())
            .eq(job_listing::Column::CompanyId, f.company_id)
            .pivot(resolved.as_deref())
            .live(job_listing::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        let rows = job_listing::Entity::find()
            .filter(cond)
            .order_by_asc(job_listing::Column::Id)
            .find_also_related(company::Entity)
            .all(&self.db)
            .await
            .map_err(&err)?;
        Ok(rows
            .into_iter()
            .map(|(listing, company)| JobListingWithCompany {
                listing,
                company: company.filter(|c| c.deleted_at.is_none()),
            })
            .collect())
    }
}

#[async_trait]
impl Lister<project::Entity> for SeaOrmRepository {
    async fn list_rows(&self, ctx: &CallContext, f: &ProjectFilter) -> Result<Vec<project::Model>, ServiceError> {
        let err = storage(Operation::List, "project", None);
        let resolved = match present(f.candidate_id) {
            Some(candidate) => {
                ctx.ensure_active()?;
                let ids = pivot_ids::<candidate_project::Entity>(
                    &self.db,
                    candidate_project::Column::CandidateId,
                    candidate,
                    candidate_project::Column::ProjectId,
                )
                .await
                .map_err(&err)?;
                Some(ids)
            }
            None => None,
        };
        let cond = PredicateBuilder::<project::Entity>::new(project::Column::Id)
            .ids(&f.ids)
            .contains(&[project::Column::Name], f.name.as_deref())
            .eq(project::Column::CandidateId, f.owner_id)
            .pivot(resolved.as_deref())
            .live(project::Column::DeletedAt)
            .build();
        ctx.ensure_active()?;
        project::Entity::find()
            .filter(cond)
            .order_by_asc(project::Column::Id)
            .all(&self.db)
            .await
            .map_err(&err)
    }
}
