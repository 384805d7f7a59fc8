//! Follow relations and the personalized feed.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Follow, Post, User};
use crate::error::DomainError;
use crate::ports::{FollowRepository, PostRepository, UserRepository};

/// Follow/unfollow toggling and feed assembly.
pub struct FollowService {
    follows: Arc<dyn FollowRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl FollowService {
    pub fn new(
        follows: Arc<dyn FollowRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            follows,
            posts,
            users,
        }
    }

    /// Subscribe `user_id` to the author behind `username`.
    ///
    /// Following yourself is rejected; following someone twice is a
    /// no-op rather than an error.
    pub async fn follow(&self, user_id: Uuid, username: &str) -> Result<(), DomainError> {
        let author = self.resolve_author(username).await?;

        if author.id == user_id {
            return Err(DomainError::Validation("cannot follow yourself".into()));
        }

        if self.follows.find_pair(user_id, author.id).await?.is_some() {
            return Ok(());
        }

        self.follows.save(Follow::new(user_id, author.id)).await?;
        Ok(())
    }

    /// Remove the subscription if present; absent relations are a no-op.
    pub async fn unfollow(&self, user_id: Uuid, username: &str) -> Result<(), DomainError> {
        let author = self.resolve_author(username).await?;
        self.follows.delete_pair(user_id, author.id).await?;
        Ok(())
    }

    /// Whether `user_id` currently follows the given author.
    pub async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.follows.find_pair(user_id, author_id).await?.is_some())
    }

    /// Posts by every author the viewer follows, newest first.
    /// A viewer following nobody gets an empty feed, not an error.
    pub async fn feed(&self, viewer_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let authors = self.follows.authors_followed_by(viewer_id).await?;
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.posts.find_by_authors(&authors).await?)
    }

    async fn resolve_author(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))
    }
}
