//! In-memory store implementing every repository port.
//!
//! Used when no database is configured and as the backing store for
//! service-level tests. Referential-integrity rules match the
//! PostgreSQL schema: deleting a post cascades to its comments,
//! deleting a group clears `group_id` on its posts, deleting a user
//! cascades to their posts, comments and follow relations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use murmur_core::domain::{Comment, Follow, Group, Post, User};
use murmur_core::error::RepoError;
use murmur_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, GroupRepository, PostRepository,
    UserRepository,
};

/// Insertion sequence numbers keep orderings stable when timestamps
/// collide (common under a manual test clock).
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    groups: RwLock<HashMap<Uuid, Group>>,
    posts: RwLock<HashMap<Uuid, (u64, Post)>>,
    comments: RwLock<HashMap<Uuid, (u64, Comment)>>,
    follows: RwLock<HashMap<Uuid, Follow>>,
    seq: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    async fn delete_comments_of_post(&self, post_id: Uuid) {
        let mut comments = self.comments.write().await;
        comments.retain(|_, (_, c)| c.post_id != post_id);
    }
}

fn newest_first(rows: &HashMap<Uuid, (u64, Post)>, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
    let mut matched: Vec<&(u64, Post)> = rows.values().filter(|(_, p)| keep(p)).collect();
    matched.sort_by(|(sa, a), (sb, b)| b.pub_date.cmp(&a.pub_date).then(sb.cmp(sa)));
    matched.iter().map(|(_, p)| p.clone()).collect()
}

// ---- users ----

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.users.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        // Cascade: the user's posts (with their comments), comments
        // and follow relations in both directions.
        let post_ids: Vec<Uuid> = {
            let posts = self.posts.read().await;
            posts
                .values()
                .filter(|(_, p)| p.author_id == id)
                .map(|(_, p)| p.id)
                .collect()
        };
        for post_id in post_ids {
            self.posts.write().await.remove(&post_id);
            self.delete_comments_of_post(post_id).await;
        }

        self.comments
            .write()
            .await
            .retain(|_, (_, c)| c.author_id != id);
        self.follows
            .write()
            .await
            .retain(|_, f| f.user_id != id && f.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

// ---- groups ----

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn save(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.groups.write().await;
        let taken = groups
            .values()
            .any(|g| g.slug == group.slug && g.id != group.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                group.slug
            )));
        }
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.groups.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        // Null-on-delete: posts keep living without their group.
        let mut posts = self.posts.write().await;
        for (_, post) in posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.groups.read().await;
        Ok(groups.values().find(|g| g.slug == slug).cloned())
    }
}

// ---- posts ----

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).map(|(_, p)| p.clone()))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let seq = posts
            .get(&post.id)
            .map(|(seq, _)| *seq)
            .unwrap_or_else(|| self.next_seq());
        posts.insert(post.id, (seq, post.clone()));
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.posts.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        self.delete_comments_of_post(id).await;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(&*self.posts.read().await, |_| true))
    }

    async fn find_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(&*self.posts.read().await, |p| {
            p.group_id == Some(group_id)
        }))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(&*self.posts.read().await, |p| {
            p.author_id == author_id
        }))
    }

    async fn find_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(&*self.posts.read().await, |p| {
            author_ids.contains(&p.author_id)
        }))
    }
}

// ---- comments ----

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.comments.read().await.get(&id).map(|(_, c)| c.clone()))
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        let seq = comments
            .get(&comment.id)
            .map(|(seq, _)| *seq)
            .unwrap_or_else(|| self.next_seq());
        comments.insert(comment.id, (seq, comment.clone()));
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.comments.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut matched: Vec<&(u64, Comment)> = comments
            .values()
            .filter(|(_, c)| c.post_id == post_id)
            .collect();
        matched.sort_by(|(sa, a), (sb, b)| a.created.cmp(&b.created).then(sa.cmp(sb)));
        Ok(matched.iter().map(|(_, c)| c.clone()).collect())
    }
}

// ---- follows ----

#[async_trait]
impl BaseRepository<Follow, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Follow>, RepoError> {
        Ok(self.follows.read().await.get(&id).cloned())
    }

    async fn save(&self, follow: Follow) -> Result<Follow, RepoError> {
        self.follows.write().await.insert(follow.id, follow.clone());
        Ok(follow)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.follows.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn find_pair(
        &self,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Follow>, RepoError> {
        let follows = self.follows.read().await;
        Ok(follows
            .values()
            .find(|f| f.user_id == user_id && f.author_id == author_id)
            .cloned())
    }

    async fn authors_followed_by(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let follows = self.follows.read().await;
        Ok(follows
            .values()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.author_id)
            .collect())
    }

    async fn delete_pair(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let mut follows = self.follows.write().await;
        let before = follows.len();
        follows.retain(|_, f| !(f.user_id == user_id && f.author_id == author_id));
        Ok(follows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(name: &str) -> User {
        User::new(name.to_string(), "hash".to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_username_must_be_unique() {
        let store = InMemoryStore::new();
        store.save(user("alice")).await.unwrap();

        let result = store.save(user("alice")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_post_cascades_to_comments() {
        let store = InMemoryStore::new();
        let author = store.save(user("alice")).await.unwrap();
        let post = store
            .save(Post::new(author.id, "hello".into(), None, None, Utc::now()))
            .await
            .unwrap();
        store
            .save(Comment::new(post.id, author.id, "hi".into(), Utc::now()))
            .await
            .unwrap();

        BaseRepository::<Post, Uuid>::delete(&store, post.id)
            .await
            .unwrap();
        assert!(store.find_by_post(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_group_clears_post_group() {
        let store = InMemoryStore::new();
        let author = store.save(user("alice")).await.unwrap();
        let group = store
            .save(Group::new("Title".into(), "slug".into(), "desc".into()))
            .await
            .unwrap();
        let post = store
            .save(Post::new(
                author.id,
                "hello".into(),
                Some(group.id),
                None,
                Utc::now(),
            ))
            .await
            .unwrap();

        BaseRepository::<Group, Uuid>::delete(&store, group.id)
            .await
            .unwrap();

        let post = BaseRepository::<Post, Uuid>::find_by_id(&store, post.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.group_id, None);
    }
}
