/// HTTP handlers for sns-service
///
/// - Posts: list, create, read, update, delete (cascading)
/// - Comments: nested under their post
/// - Likes: idempotent like, no-op unlike
/// - Health: metadata, liveness, readiness, OpenAPI document
pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;

use crate::error::AppError;
use crate::openapi::ApiDoc;
use actix_web::web;
use utoipa::OpenApi;

/// Body extraction failures share the 422 error body with field validation
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(vec![err.to_string()]).into()
    })
}

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::Data::new(ApiDoc::openapi()))
        .route("/", web::get().to(health::service_info))
        .route(ApiDoc::openapi_json_path(), web::get().to(health::openapi_json))
        .route("/health", web::get().to(health::health_summary))
        .route("/health/ready", web::get().to(health::readiness_summary))
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .service(
            web::scope("/api/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/{post_id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::patch().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post)),
                )
                .service(
                    web::resource("/{post_id}/comments")
                        .route(web::get().to(comments::list_comments))
                        .route(web::post().to(comments::create_comment)),
                )
                .service(
                    web::resource("/{post_id}/comments/{comment_id}")
                        .route(web::get().to(comments::get_comment))
                        .route(web::patch().to(comments::update_comment))
                        .route(web::delete().to(comments::delete_comment)),
                )
                .service(
                    web::resource("/{post_id}/likes")
                        .route(web::post().to(likes::like_post))
                        .route(web::delete().to(likes::unlike_post)),
                ),
        );
}
