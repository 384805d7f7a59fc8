//! Application state - shared across all handlers.

use std::sync::Arc;

use murmur_core::ports::{
    Cache, Clock, CommentRepository, FollowRepository, GroupRepository, PostRepository,
    UserRepository,
};
use murmur_core::services::{FollowService, PostService};
use murmur_infra::cache::{InMemoryCache, PageCache};
use murmur_infra::clock::SystemClock;
use murmur_infra::database::InMemoryStore;

#[cfg(feature = "postgres")]
use murmur_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresFollowRepository,
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub follows: Arc<FollowService>,
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub page_cache: Arc<PageCache>,
    pub clock: Arc<dyn Clock>,
}

/// One full set of repository implementations.
struct Repositories {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    follows: Arc<dyn FollowRepository>,
}

fn memory_repositories() -> Repositories {
    let store = Arc::new(InMemoryStore::new());
    Repositories {
        users: store.clone(),
        groups: store.clone(),
        posts: store.clone(),
        comments: store.clone(),
        follows: store,
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new(clock.clone()));
        let page_cache = Arc::new(PageCache::new(cache, config.index_cache_ttl));

        #[cfg(feature = "postgres")]
        let repos: Repositories = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        // Each repository's DbConn handle shares the pool.
                        let conn = connections.main;
                        Repositories {
                            users: Arc::new(PostgresUserRepository::new(conn.clone())),
                            groups: Arc::new(PostgresGroupRepository::new(conn.clone())),
                            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                            comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
                            follows: Arc::new(PostgresFollowRepository::new(conn)),
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        memory_repositories()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos: Repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            memory_repositories()
        };

        let posts = Arc::new(PostService::new(
            repos.posts.clone(),
            repos.groups.clone(),
            repos.comments,
            repos.users.clone(),
            clock.clone(),
        ));
        let follows = Arc::new(FollowService::new(
            repos.follows,
            repos.posts,
            repos.users.clone(),
        ));

        tracing::info!("Application state initialized");

        Self {
            posts,
            follows,
            users: repos.users,
            groups: repos.groups,
            page_cache,
            clock,
        }
    }
}
