//! Post and comment operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Group, Post, User};
use crate::error::DomainError;
use crate::ports::{Clock, CommentRepository, GroupRepository, PostRepository, UserRepository};

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub group_slug: Option<String>,
    pub image: Option<String>,
}

/// Input for editing a post. `pub_date`, `author` and `image` are
/// untouched by edits.
#[derive(Debug, Clone)]
pub struct PostEdit {
    pub text: String,
    pub group_slug: Option<String>,
}

/// Query and mutation operations on posts and comments.
///
/// All listings come back ordered by `pub_date` descending; that
/// ordering is owned by the repositories.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            groups,
            comments,
            users,
            clock,
        }
    }

    /// All posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_all().await?)
    }

    /// A group and its posts, newest first.
    pub async fn group_posts(&self, slug: &str) -> Result<(Group, Vec<Post>), DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let posts = self.posts.find_by_group(group.id).await?;
        Ok((group, posts))
    }

    /// An author and their posts, newest first.
    pub async fn author_posts(&self, username: &str) -> Result<(User, Vec<Post>), DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let posts = self.posts.find_by_author(author.id).await?;
        Ok((author, posts))
    }

    /// One post together with its comments, oldest comment first.
    pub async fn post_detail(&self, post_id: Uuid) -> Result<(Post, Vec<Comment>), DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let comments = self.comments.find_by_post(post_id).await?;
        Ok((post, comments))
    }

    /// Publish a new post on behalf of `author_id`.
    pub async fn create_post(&self, author_id: Uuid, input: NewPost) -> Result<Post, DomainError> {
        let text = non_blank(&input.text)?;
        let group_id = self.resolve_group(input.group_slug.as_deref()).await?;

        let post = Post::new(author_id, text, group_id, input.image, self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    /// Edit an existing post. Only the author may edit.
    pub async fn edit_post(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        input: PostEdit,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if post.author_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        post.text = non_blank(&input.text)?;
        post.group_id = self.resolve_group(input.group_slug.as_deref()).await?;

        Ok(self.posts.save(post).await?)
    }

    /// Attach a comment to a post on behalf of `author_id`.
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let text = non_blank(text)?;

        // The post must exist before anything is persisted.
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let comment = Comment::new(post_id, author_id, text, self.clock.now());
        Ok(self.comments.save(comment).await?)
    }

    async fn resolve_group(&self, slug: Option<&str>) -> Result<Option<Uuid>, DomainError> {
        match slug {
            None => Ok(None),
            Some(slug) => {
                let group = self
                    .groups
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| DomainError::not_found("group", slug))?;
                Ok(Some(group.id))
            }
        }
    }
}

fn non_blank(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("text must not be blank".into()));
    }
    Ok(trimmed.to_string())
}
