use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet, Set};

use crate::db::{connect_with_config, DatabaseConfig};
use crate::{candidate, candidate_job_listing, company, job_listing, rating, skill};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn seed_candidate(db: &DatabaseConnection, email: &str) -> Result<candidate::Model> {
    let now = Utc::now().fixed_offset();
    let am = candidate::ActiveModel {
        id: NotSet,
        first_name: Set("Ada".into()),
        last_name: Set("Lovelace".into()),
        email: Set(email.into()),
        headline: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn migrations_create_tables_with_auto_ids() -> Result<()> {
    let db = setup_test_db().await?;
    let first = seed_candidate(&db, "a@example.com").await?;
    let second = seed_candidate(&db, "b@example.com").await?;
    assert!(first.id > 0);
    assert!(second.id > first.id);

    let now = Utc::now().fixed_offset();
    let co = company::ActiveModel {
        id: NotSet,
        name: Set("Acme".into()),
        website: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await?;
    let jl = job_listing::ActiveModel {
        id: NotSet,
        company_id: Set(co.id),
        title: Set("Engineer".into()),
        description: Set(None),
        location: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await?;
    let owner = jl.find_related(company::Entity).one(&db).await?;
    assert_eq!(owner.map(|c| c.id), Some(co.id));
    Ok(())
}

#[tokio::test]
async fn orphan_pivot_rows_are_rejected_by_foreign_keys() -> Result<()> {
    let db = setup_test_db().await?;
    let c = seed_candidate(&db, "pivot@example.com").await?;
    let orphan = candidate_job_listing::ActiveModel {
        id: NotSet,
        candidate_id: Set(c.id),
        job_listing_id: Set(4242),
        created_at: Set(Utc::now().fixed_offset()),
    };
    assert!(orphan.insert(&db).await.is_err());
    Ok(())
}

#[tokio::test]
async fn ratings_load_with_their_candidate() -> Result<()> {
    let db = setup_test_db().await?;
    let c = seed_candidate(&db, "rated@example.com").await?;
    let now = Utc::now().fixed_offset();
    let s = skill::ActiveModel {
        id: NotSet,
        name: Set("Rust".into()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await?;
    rating::ActiveModel {
        id: NotSet,
        candidate_id: Set(c.id),
        skill_id: Set(s.id),
        score: Set(4),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await?;

    let loaded = candidate::Entity::find().find_with_related(rating::Entity).all(&db).await?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].1.len(), 1);
    assert_eq!(loaded[0].1[0].skill_id, s.id);
    Ok(())
}

#[tokio::test]
async fn migrations_roll_back_cleanly() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::down(&db, None).await?;
    assert!(candidate::Entity::find().all(&db).await.is_err());
    Ok(())
}
