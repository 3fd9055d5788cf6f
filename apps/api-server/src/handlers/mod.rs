//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .service(
            web::scope("/forum")
                .route("/post/{author}", web::post().to(posts::create_post))
                .route("/post/{id}", web::get().to(posts::find_post_by_id))
                .route("/post/{id}", web::put().to(posts::update_post))
                .route("/post/{id}", web::delete().to(posts::delete_post))
                .route(
                    "/post/{post_id}/comment/{user}",
                    web::put().to(posts::add_comment),
                )
                .route("/post/{post_id}/like", web::put().to(posts::add_like))
                .route("/posts", web::get().to(posts::find_all_posts))
                .route(
                    "/posts/author/{author}",
                    web::get().to(posts::find_posts_by_author),
                )
                .route("/posts/tags", web::post().to(posts::find_posts_by_tags))
                .route("/posts/period", web::post().to(posts::find_posts_by_period)),
        );
}
