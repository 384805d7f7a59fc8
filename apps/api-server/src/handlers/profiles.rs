//! Profile and follow handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use murmur_core::services::{PAGE_SIZE, paginate};
use murmur_shared::dto::{PageResponse, PostResponse, ProfileResponse};

use crate::handlers::render::{PageQuery, post_responses};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
struct ProfilePage {
    profile: ProfileResponse,
    page: PageResponse<PostResponse>,
}

/// GET /profile/{username}/ - one author's posts, newest first.
///
/// Authenticated requests also learn whether they follow this author.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let (author, posts) = state.posts.author_posts(&username).await?;

    let following = match identity.0 {
        Some(viewer) => Some(state.follows.is_following(viewer.user_id, author.id).await?),
        None => None,
    };

    let post_count = posts.len();
    let page = paginate(posts, query.number(), PAGE_SIZE);
    let items = post_responses(&state, page.items).await?;

    Ok(HttpResponse::Ok().json(ProfilePage {
        profile: ProfileResponse {
            username: author.username,
            post_count,
            following,
        },
        page: PageResponse {
            items,
            page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
        },
    }))
}

/// GET /follow/ - the personalized feed: posts by followed authors.
pub async fn follow_index(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.follows.feed(identity.user_id).await?;
    let page = paginate(posts, query.number(), PAGE_SIZE);
    let items = post_responses(&state, page.items).await?;

    Ok(HttpResponse::Ok().json(PageResponse {
        items,
        page: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }))
}

/// POST /profile/{username}/follow/ - subscribe to an author.
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.follows.follow(identity.user_id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /profile/{username}/unfollow/ - remove the subscription.
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.follows.unfollow(identity.user_id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
