//! Column knowledge the generic repository needs per table.

use models::{candidate, candidate_job_listing, candidate_project, company, job_listing, project, rating, skill};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ActiveValue::NotSet, EntityTrait, Set};

pub trait Stored: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send;

    fn id_col() -> Self::Column;

    /// Insert form of a record: id left to the database, timestamps set to `now`.
    fn for_insert(model: Self::Model, now: DateTimeWithTimeZone) -> Self::Active;
}

/// Business tables: soft-deleted and updatable.
pub trait Mutable: Stored {
    fn deleted_col() -> Self::Column;

    /// Column holding the owner reference, `None` when a row owns itself or
    /// has no owner.
    fn owner_col() -> Option<Self::Column>;

    /// Update form of a record: id, `created_at` and `deleted_at` untouched.
    fn for_update(model: Self::Model, now: DateTimeWithTimeZone) -> Self::Active;
}

impl Stored for company::Entity {
    type Active = company::ActiveModel;

    fn id_col() -> company::Column { company::Column::Id }

    fn for_insert(m: company::Model, now: DateTimeWithTimeZone) -> company::ActiveModel {
        company::ActiveModel {
            id: NotSet,
            name: Set(m.name),
            website: Set(m.website),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Mutable for company::Entity {
    fn deleted_col() -> company::Column { company::Column::DeletedAt }
    fn owner_col() -> Option<company::Column> { None }

    fn for_update(m: company::Model, now: DateTimeWithTimeZone) -> company::ActiveModel {
        company::ActiveModel {
            id: NotSet,
            name: Set(m.name),
            website: Set(m.website),
            created_at: NotSet,
            updated_at: Set(now),
            deleted_at: NotSet,
        }
    }
}

impl Stored for candidate::Entity {
    type Active = candidate::ActiveModel;

    fn id_col() -> candidate::Column { candidate::Column::Id }

    fn for_insert(m: candidate::Model, now: DateTimeWithTimeZone) -> candidate::ActiveModel {
        candidate::ActiveModel {
            id: NotSet,
            first_name: Set(m.first_name),
            last_name: Set(m.last_name),
            email: Set(m.email),
            headline: Set(m.headline),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Mutable for candidate::Entity {
    fn deleted_col() -> candidate::Column { candidate::Column::DeletedAt }
    fn owner_col() -> Option<candidate::Column> { None }

    fn for_update(m: candidate::Model, now: DateTimeWithTimeZone) -> candidate::ActiveModel {
        candidate::ActiveModel {
            id: NotSet,
            first_name: Set(m.first_name),
            last_name: Set(m.last_name),
            email: Set(m.email),
            headline: Set(m.headline),
            created_at: NotSet,
            updated_at: Set(now),
            deleted_at: NotSet,
        }
    }
}

impl Stored for skill::Entity {
    type Active = skill::ActiveModel;

    fn id_col() -> skill::Column { skill::Column::Id }

    fn for_insert(m: skill::Model, now: DateTimeWithTimeZone) -> skill::ActiveModel {
        skill::ActiveModel { id: NotSet, name: Set(m.name), created_at: Set(now), updated_at: Set(now), deleted_at: Set(None) }
    }
}

impl Mutable for skill::Entity {
    fn deleted_col() -> skill::Column { skill::Column::DeletedAt }
    fn owner_col() -> Option<skill::Column> { None }

    fn for_update(m: skill::Model, now: DateTimeWithTimeZone) -> skill::ActiveModel {
        skill::ActiveModel { id: NotSet, name: Set(m.name), created_at: NotSet, updated_at: Set(now), deleted_at: NotSet }
    }
}

impl Stored for rating::Entity {
    type Active = rating::ActiveModel;

    fn id_col() -> rating::Column { rating::Column::Id }

    fn for_insert(m: rating::Model, now: DateTimeWithTimeZone) -> rating::ActiveModel {
        rating::ActiveModel {
            id: NotSet,
            candidate_id: Set(m.candidate_id),
            skill_id: Set(m.skill_id),
            score: Set(m.score),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Mutable for rating::Entity {
    fn deleted_col() -> rating::Column { rating::Column::DeletedAt }
    fn owner_col() -> Option<rating::Column> { Some(rating::Column::CandidateId) }

    fn for_update(m: rating::Model, now: DateTimeWithTimeZone) -> rating::ActiveModel {
        rating::ActiveModel {
            id: NotSet,
            candidate_id: NotSet,
            skill_id: Set(m.skill_id),
            score: Set(m.score),
            created_at: NotSet,
            updated_at: Set(now),
            deleted_at: NotSet,
        }
    }
}

impl Stored for job_listing::Entity {
    type Active = job_listing::ActiveModel;

    fn id_col() -> job_listing::Column { job_listing::Column::Id }

    fn for_insert(m: job_listing::Model, now: DateTimeWithTimeZone) -> job_listing::ActiveModel {
        job_listing::ActiveModel {
            id: NotSet,
            company_id: Set(m.company_id),
            title: Set(m.title),
            description: Set(m.description),
            location: Set(m.location),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Mutable for job_listing::Entity {
    fn deleted_col() -> job_listing::Column { job_listing::Column::DeletedAt }
    fn owner_col() -> Option<job_listing::Column> { Some(job_listing::Column::CompanyId) }

    fn for_update(m: job_listing::Model, now: DateTimeWithTimeZone) -> job_listing::ActiveModel {
        job_listing::ActiveModel {
            id: NotSet,
            company_id: NotSet,
            title: Set(m.title),
            description: Set(m.description),
            location: Set(m.location),
            created_at: NotSet,
            updated_at: Set(now),
            deleted_at: NotSet,
        }
    }
}

impl Stored for project::Entity {
    type Active = project::ActiveModel;

    fn id_col() -> project::Column { project::Column::Id }

    fn for_insert(m: project::Model, now: DateTimeWithTimeZone) -> project::ActiveModel {
        project::ActiveModel {
            id: NotSet,
            candidate_id: Set(m.candidate_id),
            name: Set(m.name),
            description: Set(m.description),
            url: Set(m.url),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Mutable for project::Entity {
    fn deleted_col() -> project::Column { project::Column::DeletedAt }
    fn owner_col() -> Option<project::Column> { Some(project::Column::CandidateId) }

    fn for_update(m: project::Model, now: DateTimeWithTimeZone) -> project::ActiveModel {
        project::ActiveModel {
            id: NotSet,
            candidate_id: NotSet,
            name: Set(m.name),
            description: Set(m.description),
            url: Set(m.url),
            created_at: NotSet,
            updated_at: Set(now),
            deleted_at: NotSet,
        }
    }
}

impl Stored for candidate_job_listing::Entity {
    type Active = candidate_job_listing::ActiveModel;

    fn id_col() -> candidate_job_listing::Column { candidate_job_listing::Column::Id }

    fn for_insert(m: candidate_job_listing::Model, now: DateTimeWithTimeZone) -> candidate_job_listing::ActiveModel {
        candidate_job_listing::ActiveModel {
            id: NotSet,
            candidate_id: Set(m.candidate_id),
            job_listing_id: Set(m.job_listing_id),
            created_at: Set(now),
        }
    }
}

impl Stored for candidate_project::Entity {
    type Active = candidate_project::ActiveModel;

    fn id_col() -> candidate_project::Column { candidate_project::Column::Id }

    fn for_insert(m: candidate_project::Model, now: DateTimeWithTimeZone) -> candidate_project::ActiveModel {
        candidate_project::ActiveModel {
            id: NotSet,
            candidate_id: Set(m.candidate_id),
            project_id: Set(m.project_id),
            created_at: Set(now),
        }
    }
}
