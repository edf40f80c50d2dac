use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::modules::rating::application::ports::{RatingLedger, UserRatingStore};
use crate::modules::rating::domain::StarRating;
use crate::modules::review::domain::{
    Reaction, ReactionCounts, ReactionKind, ReactionRepository, Review, ReviewRepository,
};
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};

struct StoredReview {
    // insertion order, used for newest-first listings
    seq: u64,
    review: Review,
}

type ReviewKey = (Uuid, UserId);

/// Reviews keyed by (production, user), which also serve as the rating store
#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: DashMap<ReviewKey, StoredReview>,
    // review id -> key into `reviews`
    by_id: DashMap<Uuid, ReviewKey>,
    next_seq: AtomicU64,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    fn key_of(&self, review_id: Uuid) -> Option<ReviewKey> {
        self.by_id.get(&review_id).map(|key| key.value().clone())
    }

    fn newest_first<F>(&self, predicate: F) -> Vec<Review>
    where
        F: Fn(&Review) -> bool,
    {
        let mut matching: Vec<(u64, Review)> = self
            .reviews
            .iter()
            .filter(|entry| predicate(&entry.review))
            .map(|entry| (entry.seq, entry.review.clone()))
            .collect();
        matching.sort_by(|a, b| b.0.cmp(&a.0));
        matching.into_iter().map(|(_, review)| review).collect()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find(&self, production_id: Uuid, user_id: &UserId) -> AppResult<Option<Review>> {
        Ok(self
            .reviews
            .get(&(production_id, user_id.clone()))
            .map(|entry| entry.review.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        Ok(self.key_of(id).and_then(|key| {
            self.reviews
                .get(&key)
                .map(|entry| entry.review.clone())
        }))
    }

    async fn save(&self, review: &Review) -> AppResult<()> {
        let key = (review.production_id, review.user_id.clone());
        self.by_id.insert(review.id, key.clone());
        match self.reviews.entry(key) {
            Entry::Occupied(mut slot) => {
                let stored = slot.get_mut();
                let reactions = stored.review.reactions.clone();
                if stored.review.id != review.id {
                    self.by_id.remove(&stored.review.id);
                }
                stored.review = review.clone();
                stored.review.reactions = reactions;
            }
            Entry::Vacant(slot) => {
                slot.insert(StoredReview {
                    seq: self.next_seq(),
                    review: review.clone(),
                });
            }
        }
        Ok(())
    }

    async fn for_production(&self, production_id: Uuid, limit: usize) -> AppResult<Vec<Review>> {
        let mut reviews = self.newest_first(|review| review.production_id == production_id);
        reviews.truncate(limit);
        Ok(reviews)
    }

    async fn by_user(&self, user_id: &UserId) -> AppResult<Vec<Review>> {
        Ok(self.newest_first(|review| &review.user_id == user_id))
    }

    async fn adjust_reaction_count(
        &self,
        review_id: Uuid,
        kind: ReactionKind,
        increment: bool,
    ) -> AppResult<ReactionCounts> {
        let mut entry = self
            .key_of(review_id)
            .and_then(|key| self.reviews.get_mut(&key))
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;

        let counts = &mut entry.review.reactions;
        if increment {
            counts.increment(kind);
        } else {
            counts.decrement(kind);
        }
        Ok(counts.clone())
    }
}

#[async_trait]
impl UserRatingStore for InMemoryReviewRepository {
    async fn load_user_rating(
        &self,
        user_id: &UserId,
        production_id: Uuid,
    ) -> AppResult<StarRating> {
        Ok(self
            .reviews
            .get(&(production_id, user_id.clone()))
            .map(|entry| entry.review.rating)
            .unwrap_or(StarRating::NONE))
    }

    async fn save_user_rating(
        &self,
        user_id: &UserId,
        production_id: Uuid,
        rating: StarRating,
    ) -> AppResult<()> {
        let key = (production_id, user_id.clone());
        let seq = self.next_seq();
        let review_id = {
            let mut entry = self
                .reviews
                .entry(key.clone())
                .or_insert_with(|| StoredReview {
                    seq,
                    review: Review::visited(production_id, user_id.clone()),
                });
            entry.review.set_rating(rating);
            entry.review.id
        };
        self.by_id.entry(review_id).or_insert(key);
        Ok(())
    }
}

#[async_trait]
impl RatingLedger for InMemoryReviewRepository {
    async fn ratings_for(&self, production_id: Uuid) -> AppResult<Vec<StarRating>> {
        Ok(self
            .reviews
            .iter()
            .filter(|entry| entry.key().0 == production_id && !entry.review.rating.is_none())
            .map(|entry| entry.review.rating)
            .collect())
    }
}

/// Reactions keyed by (review, user, kind)
#[derive(Default)]
pub struct InMemoryReactionRepository {
    reactions: DashMap<(Uuid, UserId, ReactionKind), Reaction>,
}

impl InMemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {
    async fn toggle(
        &self,
        review_id: Uuid,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> AppResult<bool> {
        match self.reactions.entry((review_id, user_id.clone(), kind)) {
            Entry::Occupied(slot) => {
                slot.remove();
                Ok(false)
            }
            Entry::Vacant(slot) => {
                slot.insert(Reaction {
                    review_id,
                    user_id: user_id.clone(),
                    kind,
                    created_at: Utc::now(),
                });
                Ok(true)
            }
        }
    }

    async fn kinds_by_user(
        &self,
        review_id: Uuid,
        user_id: &UserId,
    ) -> AppResult<Vec<ReactionKind>> {
        let mut kinds: Vec<ReactionKind> = self
            .reactions
            .iter()
            .filter(|entry| entry.review_id == review_id && &entry.user_id == user_id)
            .map(|entry| entry.kind)
            .collect();
        kinds.sort();
        Ok(kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saving_a_rating_creates_visited_review() {
        let repo = InMemoryReviewRepository::new();
        let user = UserId::from("u1");
        let production = Uuid::new_v4();

        assert_eq!(
            repo.load_user_rating(&user, production).await.unwrap(),
            StarRating::NONE
        );

        repo.save_user_rating(&user, production, StarRating::new(3).unwrap())
            .await
            .unwrap();

        let review = repo.find(production, &user).await.unwrap().unwrap();
        assert!(review.visited);
        assert_eq!(review.rating.value(), 3);
        assert!(review.text.is_none());
    }

    #[tokio::test]
    async fn ledger_skips_cleared_ratings() {
        let repo = InMemoryReviewRepository::new();
        let production = Uuid::new_v4();
        for (user, stars) in [("a", 4), ("b", 0), ("c", 2)] {
            repo.save_user_rating(&UserId::from(user), production, StarRating::new(stars).unwrap())
                .await
                .unwrap();
        }
        repo.save_user_rating(&UserId::from("a"), Uuid::new_v4(), StarRating::new(5).unwrap())
            .await
            .unwrap();

        let mut ratings = repo.ratings_for(production).await.unwrap();
        ratings.sort();
        assert_eq!(
            ratings,
            vec![StarRating::new(2).unwrap(), StarRating::new(4).unwrap()]
        );
    }

    #[tokio::test]
    async fn save_preserves_reaction_counts() {
        let repo = InMemoryReviewRepository::new();
        let mut review = Review::visited(Uuid::new_v4(), UserId::from("author"));
        repo.save(&review).await.unwrap();
        repo.adjust_reaction_count(review.id, ReactionKind::Heart, true)
            .await
            .unwrap();

        review.set_text("Sterk acteerwerk");
        repo.save(&review).await.unwrap();

        let stored = repo.find_by_id(review.id).await.unwrap().unwrap();
        assert_eq!(stored.reactions.get(ReactionKind::Heart), 1);
        assert!(stored.has_text());
    }

    #[tokio::test]
    async fn reviews_created_by_rating_are_found_by_id() {
        let repo = InMemoryReviewRepository::new();
        let user = UserId::from("rater");
        let production = Uuid::new_v4();
        repo.save_user_rating(&user, production, StarRating::new(5).unwrap())
            .await
            .unwrap();
        let review = repo.find(production, &user).await.unwrap().unwrap();

        let counts = repo
            .adjust_reaction_count(review.id, ReactionKind::Celebration, true)
            .await
            .unwrap();
        assert_eq!(counts.get(ReactionKind::Celebration), 1);
        assert_eq!(
            repo.find_by_id(review.id).await.unwrap().unwrap().rating.value(),
            5
        );

        assert!(matches!(
            repo.adjust_reaction_count(Uuid::new_v4(), ReactionKind::Heart, true)
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let repo = InMemoryReactionRepository::new();
        let review = Uuid::new_v4();
        let user = UserId::from("fan");

        assert!(repo.toggle(review, &user, ReactionKind::Smile).await.unwrap());
        assert_eq!(
            repo.kinds_by_user(review, &user).await.unwrap(),
            vec![ReactionKind::Smile]
        );
        assert!(!repo.toggle(review, &user, ReactionKind::Smile).await.unwrap());
        assert!(repo.kinds_by_user(review, &user).await.unwrap().is_empty());
    }
}
