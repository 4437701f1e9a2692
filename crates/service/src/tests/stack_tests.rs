//! The composed stack against a migrated in-memory database.

use anyhow::Result;
use models::{optional_business_eq, BusinessEq};

use crate::filters::{CandidateFilter, JobListingFilter, ProjectFilter};
use crate::pivot::{CandidateJobListing, CandidateProject, PivotService};
use crate::resource::{Candidate, Company, JobListing, Project, Rating, Skill};
use crate::test_support::{admin, anonymous, company_ctx, ctx_for, get_db, records};
use crate::{build_service, Operation, Service, ServiceError, TalentService};

async fn stack() -> Result<TalentService> {
    Ok(build_service(get_db().await?, &configs::AuthConfig::default()))
}

#[tokio::test]
async fn create_then_get_preserves_business_fields() -> Result<()> {
    let svc = stack().await?;
    let mut input = records::candidate("Ada", "Lovelace", "ada@example.com");
    input.headline = Some("Analyst".into());

    let created = Service::<Candidate>::create(&svc, &admin(), input.clone()).await?;
    assert!(created.id > 0);
    assert!(created.business_eq(&input));

    let fetched = Service::<Candidate>::get(&svc, &admin(), created.id).await?;
    assert!(optional_business_eq(fetched.as_ref(), Some(&input)));
    assert!(!optional_business_eq(fetched.as_ref(), None));
    Ok(())
}

#[tokio::test]
async fn pivot_lookup_returns_linked_listings_with_company() -> Result<()> {
    let svc = stack().await?;
    let ctx = admin();
    let acme = Service::<Company>::create(&svc, &ctx, records::company("Acme")).await?;
    let mut listings = Vec::new();
    for title in ["Backend", "Frontend", "Data"] {
        listings.push(Service::<JobListing>::create(&svc, &ctx, records::job_listing(acme.id, title)).await?);
    }
    let cand = Service::<Candidate>::create(&svc, &ctx, records::candidate("Ada", "L", "ada@example.com")).await?;
    for listing in [&listings[0], &listings[2]] {
        PivotService::<CandidateJobListing>::create(&svc, &ctx, records::candidate_job_listing(cand.id, listing.id)).await?;
    }

    let filter = JobListingFilter { candidate_id: Some(cand.id), ..Default::default() };
    let found = Service::<JobListing>::list(&svc, &anonymous(), filter).await?;
    let ids: Vec<i64> = found.iter().map(|l| l.listing.id).collect();
    assert_eq!(ids, vec![listings[0].id, listings[2].id]);
    assert!(found.iter().all(|l| l.company.as_ref().map(|c| c.id) == Some(acme.id)));

    // the pivot narrows a direct id filter instead of replacing it
    let filter = JobListingFilter { ids: vec![listings[1].id, listings[2].id], candidate_id: Some(cand.id), ..Default::default() };
    let found = Service::<JobListing>::list(&svc, &anonymous(), filter).await?;
    assert_eq!(found.iter().map(|l| l.listing.id).collect::<Vec<_>>(), vec![listings[2].id]);
    Ok(())
}

#[tokio::test]
async fn empty_pivot_lists_nothing_without_error() -> Result<()> {
    let svc = stack().await?;
    let ctx = admin();
    let acme = Service::<Company>::create(&svc, &ctx, records::company("Acme")).await?;
    Service::<JobListing>::create(&svc, &ctx, records::job_listing(acme.id, "Backend")).await?;
    Service::<Candidate>::create(&svc, &ctx, records::candidate("Ada", "L", "ada@example.com")).await?;

    let listings = Service::<JobListing>::list(&svc, &ctx, JobListingFilter { candidate_id: Some(42), ..Default::default() }).await?;
    assert!(listings.is_empty());
    let candidates = Service::<Candidate>::list(&svc, &ctx, CandidateFilter { job_listing_id: Some(42), ..Default::default() }).await?;
    assert!(candidates.is_empty());

    // without the pivot field everything is visible
    assert_eq!(Service::<JobListing>::list(&svc, &ctx, JobListingFilter::default()).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn owner_may_update_self_but_not_others() -> Result<()> {
    let svc = stack().await?;
    let own = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let other = Service::<Candidate>::create(&svc, &admin(), records::candidate("Bob", "M", "bob@example.com")).await?;
    let caller = ctx_for(own.id as u64, &[]);

    let renamed = candidate_named(&own, "Augusta");
    let updated = Service::<Candidate>::update(&svc, &caller, renamed).await?;
    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.created_at, own.created_at);

    let err = Service::<Candidate>::update(&svc, &caller, candidate_named(&other, "Mallory")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Update, resource: "candidate" }), "{err}");
    let untouched = Service::<Candidate>::get(&svc, &admin(), other.id).await?.expect("other candidate");
    assert_eq!(untouched.first_name, "Bob");
    Ok(())
}

fn candidate_named(c: &models::candidate::Model, first: &str) -> models::candidate::Model {
    models::candidate::Model { first_name: first.into(), ..c.clone() }
}

#[tokio::test]
async fn admin_role_alone_grants_access() -> Result<()> {
    let svc = stack().await?;
    let cand = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let skill = Service::<Skill>::create(&svc, &admin(), records::skill("Rust")).await?;
    // identity unrelated to any row, so only the role can grant
    let outsider_admin = ctx_for(9_000, &["Admin"]);
    let rating = Service::<Rating>::create(&svc, &outsider_admin, records::rating(cand.id, skill.id, 5)).await?;
    assert!(Service::<Rating>::get(&svc, &outsider_admin, rating.id).await?.is_some());
    Service::<Rating>::delete(&svc, &outsider_admin, rating.id).await?;
    Ok(())
}

#[tokio::test]
async fn non_admin_without_ownership_is_forbidden() -> Result<()> {
    let svc = stack().await?;
    let cand = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let skill = Service::<Skill>::create(&svc, &admin(), records::skill("Rust")).await?;
    let stranger = ctx_for(cand.id as u64 + 100, &["Candidate"]);

    let err = Service::<Rating>::create(&svc, &stranger, records::rating(cand.id, skill.id, 3)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Create, resource: "rating" }));
    let err = Service::<Skill>::create(&svc, &stranger, records::skill("Go")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { .. }));

    // the owner itself succeeds
    let owner = ctx_for(cand.id as u64, &[]);
    assert!(Service::<Rating>::create(&svc, &owner, records::rating(cand.id, skill.id, 3)).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn second_delete_reports_zero_rows() -> Result<()> {
    let svc = stack().await?;
    let acme = Service::<Company>::create(&svc, &admin(), records::company("Acme")).await?;
    Service::<Company>::delete(&svc, &admin(), acme.id).await?;
    let err = Service::<Company>::delete(&svc, &admin(), acme.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::ZeroRowsAffected { operation: Operation::Delete, resource: "company", id } if id == acme.id));
    assert!(Service::<Company>::get(&svc, &anonymous(), acme.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn validation_failures_name_the_entity() -> Result<()> {
    let svc = stack().await?;
    let err = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "not-an-email")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m.starts_with("candidate:")), "{err}");
    assert!(Service::<Candidate>::list(&svc, &admin(), CandidateFilter::default()).await?.is_empty());

    let err = Service::<Company>::update(&svc, &admin(), records::company("Acme")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m == "company: id required for update"), "{err}");
    Ok(())
}

#[tokio::test]
async fn pivot_rows_delete_once_and_only_by_owner() -> Result<()> {
    let svc = stack().await?;
    let acme = Service::<Company>::create(&svc, &admin(), records::company("Acme")).await?;
    let listing = Service::<JobListing>::create(&svc, &admin(), records::job_listing(acme.id, "Backend")).await?;
    let cand = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let owner = ctx_for(cand.id as u64, &[]);
    let link = PivotService::<CandidateJobListing>::create(&svc, &owner, records::candidate_job_listing(cand.id, listing.id)).await?;

    let err = PivotService::<CandidateJobListing>::delete(&svc, &ctx_for(cand.id as u64 + 1, &[]), link.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { .. }));

    PivotService::<CandidateJobListing>::delete(&svc, &owner, link.id).await?;
    let err = PivotService::<CandidateJobListing>::delete(&svc, &admin(), link.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::ZeroRowsAffected { resource: "candidate_job_listing", .. }));
    Ok(())
}

#[tokio::test]
async fn pivot_to_missing_row_is_a_storage_error() -> Result<()> {
    let svc = stack().await?;
    let cand = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let err = PivotService::<CandidateJobListing>::create(&svc, &admin(), records::candidate_job_listing(cand.id, 777)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Storage { .. }), "{err}");

    let err = PivotService::<CandidateJobListing>::create(&svc, &admin(), records::candidate_job_listing(cand.id, 0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "{err}");
    Ok(())
}

#[tokio::test]
async fn candidate_identity_never_owns_company_rows() -> Result<()> {
    let svc = stack().await?;
    let acme = Service::<Company>::create(&svc, &admin(), records::company("Acme")).await?;
    let listing = Service::<JobListing>::create(&svc, &admin(), records::job_listing(acme.id, "Backend")).await?;
    let cand = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    assert_eq!(cand.id, acme.id);
    let candidate = ctx_for(cand.id as u64, &["Candidate"]);

    let err = Service::<JobListing>::delete(&svc, &candidate, listing.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Delete, resource: "job_listing" }), "{err}");
    let err = Service::<Company>::delete(&svc, &candidate, acme.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Delete, resource: "company" }), "{err}");
    let err = Service::<JobListing>::create(&svc, &candidate, records::job_listing(acme.id, "Frontend")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Create, .. }), "{err}");
    assert!(Service::<Company>::get(&svc, &anonymous(), acme.id).await?.is_some());
    assert!(Service::<JobListing>::get(&svc, &anonymous(), listing.id).await?.is_some());

    // the same id as a company principal owns them, and not the candidate
    let company = company_ctx(acme.id as u64, &[]);
    let err = Service::<Candidate>::get(&svc, &company, cand.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Get, resource: "candidate" }), "{err}");
    let renamed = models::job_listing::Model { title: "Platform".into(), ..listing.clone() };
    assert_eq!(Service::<JobListing>::update(&svc, &company, renamed).await?.title, "Platform");
    Service::<JobListing>::delete(&svc, &company, listing.id).await?;
    Ok(())
}

#[tokio::test]
async fn linking_a_project_grants_no_access_to_it() -> Result<()> {
    let svc = stack().await?;
    let ada = Service::<Candidate>::create(&svc, &admin(), records::candidate("Ada", "L", "ada@example.com")).await?;
    let bob = Service::<Candidate>::create(&svc, &admin(), records::candidate("Bob", "M", "bob@example.com")).await?;
    let secret = Service::<Project>::create(&svc, &admin(), records::project(ada.id, "Secret")).await?;
    let as_bob = ctx_for(bob.id as u64, &[]);

    let err = Service::<Project>::get(&svc, &as_bob, secret.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::Get, resource: "project" }), "{err}");
    PivotService::<CandidateProject>::create(&svc, &as_bob, records::candidate_project(bob.id, secret.id)).await?;

    // list and get agree: the link is not ownership
    let linked = ProjectFilter { candidate_id: Some(bob.id), ..Default::default() };
    let err = Service::<Project>::list(&svc, &as_bob, linked.clone()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { operation: Operation::List, resource: "project" }), "{err}");
    let scoped = ProjectFilter { owner_id: Some(bob.id), ..linked.clone() };
    assert!(Service::<Project>::list(&svc, &as_bob, scoped).await?.is_empty());

    let as_ada = ctx_for(ada.id as u64, &[]);
    let own = Service::<Project>::list(&svc, &as_ada, ProjectFilter { owner_id: Some(ada.id), ..Default::default() }).await?;
    assert_eq!(own.iter().map(|p| p.id).collect::<Vec<_>>(), vec![secret.id]);
    assert_eq!(Service::<Project>::list(&svc, &admin(), linked).await?.len(), 1);
    Ok(())
}
