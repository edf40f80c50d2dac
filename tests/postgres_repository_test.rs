/// Postgres adapter tests - database operations
///
/// Skipped unless TEST_DATABASE_URL is set.
///
/// Tests cover:
/// - Catalog upsert and lookup
/// - Versioned compare-and-swap of the rating aggregate
/// - Per-user ratings and the rating ledger
/// - Reaction counters floored at zero
mod utils;

use std::sync::Arc;

use chrono::{Duration, Utc};
use encore::modules::production::infrastructure::ProductionRepositoryImpl;
use encore::modules::production::{Production, ProductionRepository};
use encore::modules::rating::{
    AggregateStore, RatingAggregate, RatingLedger, StarRating, UserRatingStore,
};
use encore::modules::review::{ReactionKind, Review, ReviewRepository, ReviewRepositoryImpl};
use encore::shared::domain::UserId;
use encore::shared::errors::AppError;
use encore::shared::Database;
use utils::db;

fn setup() -> Option<Arc<Database>> {
    let db = db::test_database()?;
    db::clean_test_db(&db);
    Some(db)
}

async fn stored_production(db: &Arc<Database>) -> Production {
    let repo = ProductionRepositoryImpl::new(Arc::clone(db));
    let production = Production::new("Faust", "Toneelgroep Maastricht", Utc::now());
    repo.save(&production).await.unwrap();
    production
}

#[tokio::test]
async fn production_upsert_keeps_rating_summary() {
    let _guard = db::acquire_test_lock();
    let Some(db) = setup() else { return };
    let repo = ProductionRepositoryImpl::new(Arc::clone(&db));

    let mut production = stored_production(&db).await;
    let version = repo
        .compare_and_swap(production.id, 0, RatingAggregate::new(4.0, 1))
        .await
        .unwrap();
    assert_eq!(version, 1);

    production.title = "Faust I".to_string();
    repo.save(&production).await.unwrap();

    let found = repo.find_by_id(production.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Faust I");
    assert_eq!(found.rating_count, 1);
    assert_eq!(found.rating_version, 1);
}

#[tokio::test]
async fn stale_version_is_a_conflict() {
    let _guard = db::acquire_test_lock();
    let Some(db) = setup() else { return };
    let repo = ProductionRepositoryImpl::new(Arc::clone(&db));
    let production = stored_production(&db).await;

    repo.compare_and_swap(production.id, 0, RatingAggregate::new(3.0, 1))
        .await
        .unwrap();
    let stale = repo
        .compare_and_swap(production.id, 0, RatingAggregate::new(5.0, 1))
        .await;
    assert!(matches!(stale, Err(AppError::ConcurrencyConflict(_))));

    let missing = repo
        .compare_and_swap(uuid::Uuid::new_v4(), 0, RatingAggregate::new(5.0, 1))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let current = repo.load(production.id).await.unwrap();
    assert_eq!(current.version, 1);
    assert!((current.aggregate.avg_rating - 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn user_ratings_feed_the_ledger() {
    let _guard = db::acquire_test_lock();
    let Some(db) = setup() else { return };
    let production = stored_production(&db).await;
    let reviews = ReviewRepositoryImpl::new(Arc::clone(&db));

    for (user, stars) in [("a", 5), ("b", 3), ("c", 0)] {
        reviews
            .save_user_rating(&UserId::from(user), production.id, StarRating::new(stars).unwrap())
            .await
            .unwrap();
    }
    reviews
        .save_user_rating(&UserId::from("a"), production.id, StarRating::new(4).unwrap())
        .await
        .unwrap();

    assert_eq!(
        reviews
            .load_user_rating(&UserId::from("a"), production.id)
            .await
            .unwrap()
            .value(),
        4
    );

    let mut ledger = reviews.ratings_for(production.id).await.unwrap();
    ledger.sort();
    assert_eq!(
        ledger,
        vec![StarRating::new(3).unwrap(), StarRating::new(4).unwrap()]
    );
}

#[tokio::test]
async fn reaction_counts_never_go_negative() {
    let _guard = db::acquire_test_lock();
    let Some(db) = setup() else { return };
    let production = stored_production(&db).await;
    let reviews = ReviewRepositoryImpl::new(Arc::clone(&db));

    let mut review = Review::visited(production.id, UserId::from("author"));
    review.set_text("Duivels goed");
    reviews.save(&review).await.unwrap();

    let counts = reviews
        .adjust_reaction_count(review.id, ReactionKind::ThumbsDown, false)
        .await
        .unwrap();
    assert_eq!(counts.get(ReactionKind::ThumbsDown), 0);

    let counts = reviews
        .adjust_reaction_count(review.id, ReactionKind::Heart, true)
        .await
        .unwrap();
    assert_eq!(counts.get(ReactionKind::Heart), 1);

    let newest = reviews.for_production(production.id, 5).await.unwrap();
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].text.as_deref(), Some("Duivels goed"));
}

#[tokio::test]
async fn upcoming_only_lists_future_productions() {
    let _guard = db::acquire_test_lock();
    let Some(db) = setup() else { return };
    let repo = ProductionRepositoryImpl::new(Arc::clone(&db));

    let now = Utc::now();
    for (title, offset) in [("Later", 20), ("Soon", 2), ("Past", -3)] {
        repo.save(&Production::new(title, "Producent", now + Duration::days(offset)))
            .await
            .unwrap();
    }

    let upcoming = repo.find_upcoming(now, 10).await.unwrap();
    let titles: Vec<_> = upcoming.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Soon", "Later"]);
}
