//! Shared rendering helpers - domain entities to response DTOs.

use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use murmur_core::domain::{Comment, Post};
use murmur_shared::dto::{CommentResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// `?page=N` query parameter shared by every listing route.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

impl PageQuery {
    pub fn number(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Render posts, resolving author usernames and group slugs once per
/// distinct ID.
pub async fn post_responses(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let mut usernames: HashMap<Uuid, String> = HashMap::new();
    let mut slugs: HashMap<Uuid, String> = HashMap::new();

    let mut rendered = Vec::with_capacity(posts.len());
    for post in posts {
        let author = match usernames.get(&post.author_id) {
            Some(name) => name.clone(),
            None => {
                let user = state
                    .users
                    .find_by_id(post.author_id)
                    .await
                    .map_err(AppError::from)?
                    .ok_or_else(|| AppError::Internal("post author missing".to_string()))?;
                usernames.insert(post.author_id, user.username.clone());
                user.username
            }
        };

        let group = match post.group_id {
            None => None,
            Some(group_id) => match slugs.get(&group_id) {
                Some(slug) => Some(slug.clone()),
                None => {
                    let group = state
                        .groups
                        .find_by_id(group_id)
                        .await
                        .map_err(AppError::from)?
                        .ok_or_else(|| AppError::Internal("post group missing".to_string()))?;
                    slugs.insert(group_id, group.slug.clone());
                    Some(group.slug)
                }
            },
        };

        rendered.push(PostResponse {
            id: post.id.to_string(),
            author,
            text: post.text,
            pub_date: post.pub_date.to_rfc3339(),
            group,
            image: post.image,
        });
    }

    Ok(rendered)
}

pub async fn post_response(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let mut rendered = post_responses(state, vec![post]).await?;
    Ok(rendered.remove(0))
}

pub async fn comment_responses(
    state: &AppState,
    comments: Vec<Comment>,
) -> AppResult<Vec<CommentResponse>> {
    let mut usernames: HashMap<Uuid, String> = HashMap::new();

    let mut rendered = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = match usernames.get(&comment.author_id) {
            Some(name) => name.clone(),
            None => {
                let user = state
                    .users
                    .find_by_id(comment.author_id)
                    .await
                    .map_err(AppError::from)?
                    .ok_or_else(|| AppError::Internal("comment author missing".to_string()))?;
                usernames.insert(comment.author_id, user.username.clone());
                user.username
            }
        };

        rendered.push(CommentResponse {
            id: comment.id.to_string(),
            author,
            text: comment.text,
            created: comment.created.to_rfc3339(),
        });
    }

    Ok(rendered)
}
