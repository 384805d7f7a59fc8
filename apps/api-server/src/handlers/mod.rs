//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod profiles;
mod render;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            ),
    )
    // Listings
    .route("/", web::get().to(posts::index))
    .route("/group/{slug}/", web::get().to(posts::group_list))
    .route("/profile/{username}/", web::get().to(profiles::profile))
    .route("/posts/{id}/", web::get().to(posts::post_detail))
    // Mutations (authenticated)
    .route("/create/", web::post().to(posts::create))
    .route("/posts/{id}/edit/", web::post().to(posts::edit))
    .route("/posts/{id}/comment/", web::post().to(posts::comment))
    // Follows
    .route("/follow/", web::get().to(profiles::follow_index))
    .route("/profile/{username}/follow/", web::post().to(profiles::follow))
    .route(
        "/profile/{username}/unfollow/",
        web::post().to(profiles::unfollow),
    );
}
