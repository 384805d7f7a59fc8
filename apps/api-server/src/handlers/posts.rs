//! Post listing and mutation handlers.

use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Serialize;
use uuid::Uuid;

use murmur_core::services::{NewPost, PAGE_SIZE, PostEdit, paginate};
use murmur_shared::dto::{
    CreateCommentRequest, CreatePostRequest, EditPostRequest, GroupResponse, PageResponse,
    PostDetailResponse, PostResponse,
};

use crate::handlers::render::{PageQuery, comment_responses, post_response, post_responses};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
struct GroupPage {
    group: GroupResponse,
    page: PageResponse<PostResponse>,
}

/// GET / - all posts, newest first, paginated.
///
/// Page 1 is served through the page cache: whatever rendering is in
/// the slot is returned as-is until the TTL runs out, so the index may
/// lag writes by up to the TTL.
pub async fn index(state: web::Data<AppState>, query: web::Query<PageQuery>) -> AppResult<HttpResponse> {
    let page_num = query.number();
    let cacheable = page_num == 1;

    if cacheable {
        if let Some(cached) = state.page_cache.get().await {
            return Ok(HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(cached));
        }
    }

    let posts = state.posts.list_posts().await?;
    let page = paginate(posts, page_num, PAGE_SIZE);
    let items = post_responses(&state, page.items).await?;
    let body = PageResponse {
        items,
        page: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
    };

    if cacheable {
        let rendered = serde_json::to_string(&body)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if let Err(e) = state.page_cache.put(&rendered).await {
            tracing::warn!("Failed to cache index page: {}", e);
        }
        return Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(rendered));
    }

    Ok(HttpResponse::Ok().json(body))
}

/// GET /group/{slug}/ - one group's posts, newest first, paginated.
pub async fn group_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let (group, posts) = state.posts.group_posts(&slug).await?;
    let page = paginate(posts, query.number(), PAGE_SIZE);
    let items = post_responses(&state, page.items).await?;

    Ok(HttpResponse::Ok().json(GroupPage {
        group: GroupResponse {
            title: group.title,
            slug: group.slug,
            description: group.description,
        },
        page: PageResponse {
            items,
            page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
        },
    }))
}

/// GET /posts/{id}/ - one post with its comments.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let (post, comments) = state.posts.post_detail(post_id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(&state, post).await?,
        comments: comment_responses(&state, comments).await?,
    }))
}

/// POST /create/ - publish a new post.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create_post(
            identity.user_id,
            NewPost {
                text: req.text,
                group_slug: req.group,
                image: req.image,
            },
        )
        .await?;

    tracing::debug!(post_id = %post.id, user = %identity.username, "post created");
    Ok(HttpResponse::Created().json(post_response(&state, post).await?))
}

/// POST /posts/{id}/edit/ - edit an existing post (author only).
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<EditPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .edit_post(
            identity.user_id,
            path.into_inner(),
            PostEdit {
                text: req.text,
                group_slug: req.group,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&state, post).await?))
}

/// POST /posts/{id}/comment/ - comment on a post.
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .posts
        .add_comment(identity.user_id, path.into_inner(), &body.text)
        .await?;

    let mut rendered = comment_responses(&state, vec![comment]).await?;
    Ok(HttpResponse::Created().json(rendered.remove(0)))
}
