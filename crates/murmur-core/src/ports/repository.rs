use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Follow, Group, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// Every listing method returns posts ordered by `pub_date` descending.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts belonging to one group, newest first.
    async fn find_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts written by one author, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts written by any of the given authors, newest first.
    /// An empty author set yields an empty list.
    async fn find_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Post>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    /// Find a group by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on one post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Follow repository.
#[async_trait]
pub trait FollowRepository: BaseRepository<Follow, Uuid> {
    /// Find the relation for one (follower, author) pair, if present.
    async fn find_pair(&self, user_id: Uuid, author_id: Uuid)
    -> Result<Option<Follow>, RepoError>;

    /// IDs of every author the given user follows.
    async fn authors_followed_by(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Delete the relation for one pair. Returns whether a row existed.
    async fn delete_pair(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;
}
