use std::collections::HashSet;
use std::sync::Arc;

use super::domain::{mutual_count, Friendship, FriendshipRepository, FriendshipStatus};
use crate::modules::notification::{NotificationPayload, NotificationService};
use crate::shared::domain::{Identity, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};

pub struct SocialService {
    friendships: Arc<dyn FriendshipRepository>,
    notifications: Arc<NotificationService>,
}

impl SocialService {
    pub fn new(
        friendships: Arc<dyn FriendshipRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            friendships,
            notifications,
        }
    }

    /// Ask `target` to become friends with the caller
    pub async fn send_request(
        &self,
        identity: Option<&Identity>,
        target: &UserId,
    ) -> AppResult<Friendship> {
        let identity = Identity::require(identity)?;
        let sender = &identity.user_id;

        if sender == target {
            return Err(AppError::InvalidOperation(
                "Cannot befriend yourself".to_string(),
            ));
        }

        let friendship = Friendship::request(sender.clone(), target.clone());
        if !self.friendships.insert_if_absent(&friendship).await? {
            return Err(AppError::Duplicate(format!(
                "Friendship between {} and {} already exists",
                sender, target
            )));
        }

        self.notifications
            .notify(
                target,
                NotificationPayload::FriendRequest {
                    sender_id: sender.clone(),
                },
            )
            .await?;

        log_info!("Friend request from {} to {}", sender, target);
        Ok(friendship)
    }

    pub async fn friendship_between(
        &self,
        identity: Option<&Identity>,
        other: &UserId,
    ) -> AppResult<Option<Friendship>> {
        let identity = Identity::require(identity)?;
        self.friendships
            .find_between(&identity.user_id, other)
            .await
    }

    pub async fn total_friends(&self, identity: Option<&Identity>) -> AppResult<usize> {
        let identity = Identity::require(identity)?;
        Ok(self.accepted_friend_ids(&identity.user_id).await?.len())
    }

    /// Answer the friend request `sender` sent to the caller
    pub async fn respond(
        &self,
        identity: Option<&Identity>,
        sender: &UserId,
        status: FriendshipStatus,
    ) -> AppResult<Friendship> {
        let identity = Identity::require(identity)?;
        let me = &identity.user_id;

        let friendship = self
            .friendships
            .find_between(me, sender)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Friendship between {} and {} not found", me, sender))
            })?;

        if status == FriendshipStatus::Accepted && &friendship.requester_id == me {
            return Err(AppError::Unauthorized(
                "Only the addressee can accept a friend request".to_string(),
            ));
        }

        let updated = self.friendships.update_status(friendship.id, status).await?;

        if let Some(request) = self.notifications.find_friend_request(me, sender).await? {
            if !request.read {
                self.notifications.mark_read(Some(identity), request.id).await?;
            }
        }

        log_debug!("Friendship {} is now {}", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn accepted_friend_ids(&self, user_id: &UserId) -> AppResult<HashSet<UserId>> {
        let accepted = self
            .friendships
            .for_user(user_id, Some(FriendshipStatus::Accepted))
            .await?;

        Ok(accepted
            .iter()
            .filter_map(|f| f.other(user_id).cloned())
            .collect())
    }

    /// Friends `a` and `b` have in common
    pub async fn mutual_friends(&self, a: &UserId, b: &UserId) -> AppResult<usize> {
        let (mut friends_a, mut friends_b) =
            tokio::try_join!(self.accepted_friend_ids(a), self.accepted_friend_ids(b))?;

        for user in [a, b] {
            friends_a.remove(user);
            friends_b.remove(user);
        }

        Ok(mutual_count(&friends_a, &friends_b))
    }
}
