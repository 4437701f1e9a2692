//! SeaORM repository behavior below the decorators.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::api::Repository;
use crate::context::CallContext;
use crate::filters::{CandidateFilter, CompanyFilter, ProjectFilter, RatingFilter};
use crate::pivot::{CandidateProject, PivotRepository};
use crate::repo::SeaOrmRepository;
use crate::resource::{Candidate, Company, Project, Rating, Skill};
use crate::test_support::{get_db, records};
use crate::{Operation, ServiceError};

async fn repo() -> Result<SeaOrmRepository> { Ok(SeaOrmRepository::new(get_db().await?)) }

#[tokio::test]
async fn update_cannot_reassign_owner() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    let a = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Ada", "L", "ada@example.com")).await?;
    let b = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Bob", "M", "bob@example.com")).await?;
    let skill = Repository::<Skill>::create(&repo, &ctx, records::skill("Rust")).await?;
    let rating = Repository::<Rating>::create(&repo, &ctx, records::rating(a.id, skill.id, 2)).await?;

    let moved = models::rating::Model { candidate_id: b.id, score: 5, ..rating.clone() };
    let err = Repository::<Rating>::update(&repo, &ctx, moved).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m.starts_with("rating:")), "{err}");

    let stored = Repository::<Rating>::get(&repo, &ctx, rating.id).await?.expect("rating");
    assert_eq!((stored.candidate_id, stored.score), (a.id, 2));

    let rescored = Repository::<Rating>::update(&repo, &ctx, models::rating::Model { score: 4, ..rating }).await?;
    assert_eq!((rescored.candidate_id, rescored.score), (a.id, 4));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_or_deleted_row_affects_nothing() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    let acme = Repository::<Company>::create(&repo, &ctx, records::company("Acme")).await?;
    Repository::<Company>::delete(&repo, &ctx, acme.id).await?;

    let err = Repository::<Company>::update(&repo, &ctx, acme.clone()).await.unwrap_err();
    assert!(matches!(err, ServiceError::ZeroRowsAffected { operation: Operation::Update, .. }), "{err}");
    let ghost = models::company::Model { id: acme.id + 50, ..acme };
    assert!(matches!(
        Repository::<Company>::update(&repo, &ctx, ghost).await,
        Err(ServiceError::ZeroRowsAffected { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn text_filters_match_literally_and_ignore_case() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    for name in ["100% Rust", "1000 Rust", "Rusty_Tools", "RustyXTools"] {
        Repository::<Company>::create(&repo, &ctx, records::company(name)).await?;
    }
    let names = |rows: Vec<models::company::Model>| rows.into_iter().map(|c| c.name).collect::<Vec<_>>();

    let percent = CompanyFilter { name: Some("100%".into()), ..Default::default() };
    assert_eq!(names(Repository::<Company>::list(&repo, &ctx, &percent).await?), vec!["100% Rust"]);

    let underscore = CompanyFilter { name: Some("y_t".into()), ..Default::default() };
    assert_eq!(names(Repository::<Company>::list(&repo, &ctx, &underscore).await?), vec!["Rusty_Tools"]);

    let injection = CompanyFilter { name: Some("' OR '1'='1".into()), ..Default::default() };
    assert!(Repository::<Company>::list(&repo, &ctx, &injection).await?.is_empty());

    let upper = CompanyFilter { name: Some("RUST".into()), ..Default::default() };
    assert_eq!(Repository::<Company>::list(&repo, &ctx, &upper).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn candidate_list_loads_live_ratings_and_matches_either_name() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    let ada = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Ada", "Lovelace", "ada@example.com")).await?;
    Repository::<Candidate>::create(&repo, &ctx, records::candidate("Grace", "Hopper", "grace@example.com")).await?;
    let rust = Repository::<Skill>::create(&repo, &ctx, records::skill("Rust")).await?;
    let sql = Repository::<Skill>::create(&repo, &ctx, records::skill("SQL")).await?;
    Repository::<Rating>::create(&repo, &ctx, records::rating(ada.id, rust.id, 5)).await?;
    let dropped = Repository::<Rating>::create(&repo, &ctx, records::rating(ada.id, sql.id, 1)).await?;
    Repository::<Rating>::delete(&repo, &ctx, dropped.id).await?;

    let filter = CandidateFilter { name: Some("lovelace".into()), ..Default::default() };
    let found = Repository::<Candidate>::list(&repo, &ctx, &filter).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].candidate.id, ada.id);
    assert_eq!(found[0].ratings.iter().map(|r| r.skill_id).collect::<Vec<_>>(), vec![rust.id]);

    let all = Repository::<Candidate>::list(&repo, &ctx, &CandidateFilter::default()).await?;
    assert_eq!(all.len(), 2);
    assert!(all[1].ratings.is_empty());

    let by_skill = RatingFilter { candidate_id: Some(ada.id), skill_id: Some(sql.id), ..Default::default() };
    assert!(Repository::<Rating>::list(&repo, &ctx, &by_skill).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn project_filter_resolves_through_candidate_project() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    let ada = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Ada", "L", "ada@example.com")).await?;
    let bob = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Bob", "M", "bob@example.com")).await?;
    let engine = Repository::<Project>::create(&repo, &ctx, records::project(ada.id, "Analytical Engine")).await?;
    let loom = Repository::<Project>::create(&repo, &ctx, records::project(ada.id, "Loom")).await?;
    PivotRepository::<CandidateProject>::create(&repo, &ctx, records::candidate_project(bob.id, loom.id)).await?;

    let bobs = ProjectFilter { candidate_id: Some(bob.id), ..Default::default() };
    let found = Repository::<Project>::list(&repo, &ctx, &bobs).await?;
    assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![loom.id]);

    let adas = ProjectFilter { candidate_id: Some(ada.id), ..Default::default() };
    assert!(Repository::<Project>::list(&repo, &ctx, &adas).await?.is_empty());

    let everything = Repository::<Project>::list(&repo, &ctx, &ProjectFilter::default()).await?;
    assert_eq!(everything.iter().map(|p| p.id).collect::<Vec<_>>(), vec![engine.id, loom.id]);
    Ok(())
}

#[tokio::test]
async fn project_owner_filter_matches_owning_column_only() -> Result<()> {
    let repo = repo().await?;
    let ctx = CallContext::new();
    let ada = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Ada", "L", "ada@example.com")).await?;
    let bob = Repository::<Candidate>::create(&repo, &ctx, records::candidate("Bob", "M", "bob@example.com")).await?;
    let engine = Repository::<Project>::create(&repo, &ctx, records::project(ada.id, "Analytical Engine")).await?;
    let kite = Repository::<Project>::create(&repo, &ctx, records::project(bob.id, "Kite")).await?;
    PivotRepository::<CandidateProject>::create(&repo, &ctx, records::candidate_project(bob.id, engine.id)).await?;

    let owned_by_bob = ProjectFilter { owner_id: Some(bob.id), ..Default::default() };
    let found = Repository::<Project>::list(&repo, &ctx, &owned_by_bob).await?;
    assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![kite.id]);

    // a link to someone else's project does not make it owned
    let linked_and_owned = ProjectFilter { owner_id: Some(bob.id), candidate_id: Some(bob.id), ..Default::default() };
    assert!(Repository::<Project>::list(&repo, &ctx, &linked_and_owned).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn cancelled_call_starts_no_storage_work() -> Result<()> {
    let repo = repo().await?;
    let token = CancellationToken::new();
    let ctx = CallContext::new().with_cancellation(token.clone());
    token.cancel();

    let err = Repository::<Company>::create(&repo, &ctx, records::company("Acme")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Cancelled));
    assert!(matches!(Repository::<Company>::list(&repo, &ctx, &CompanyFilter::default()).await, Err(ServiceError::Cancelled)));

    let live = CallContext::new();
    assert!(Repository::<Company>::list(&repo, &live, &CompanyFilter::default()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_checks_cancellation_only_before_writing() -> Result<()> {
    let repo = repo().await?;
    let live = CallContext::new();
    let acme = Repository::<Company>::create(&repo, &live, records::company("Acme")).await?;

    let token = CancellationToken::new();
    let cancelled = CallContext::new().with_cancellation(token.clone());
    token.cancel();
    let renamed = models::company::Model { name: "Acme Ltd".into(), ..acme.clone() };
    let err = Repository::<Company>::update(&repo, &cancelled, renamed.clone()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Cancelled));
    let stored = Repository::<Company>::get(&repo, &live, acme.id).await?.expect("company");
    assert_eq!(stored.name, "Acme");

    // a write that ran is reported with the stored row
    let updated = Repository::<Company>::update(&repo, &live, renamed).await?;
    assert_eq!(updated.name, "Acme Ltd");
    Ok(())
}
