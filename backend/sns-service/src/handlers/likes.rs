/// Like handlers
use crate::error::Result;
use crate::metrics::record_operation;
use crate::models::{LikeRequest, LikeResponse};
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

/// Like a post
///
/// Repeating the call returns the original like.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/likes",
    tag = "likes",
    params(("post_id" = String, Path, description = "Post id")),
    request_body = LikeRequest,
    responses(
        (status = 201, description = "Post liked", body = LikeResponse),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn like_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = LikeService::new((**pool).clone());
    let result = service.like_post(&post_id, &req.username).await;
    record_operation("like_post", &result);

    let (like, _created) = result?;
    Ok(HttpResponse::Created().json(LikeResponse::from(like)))
}

/// Unlike a post
///
/// No caller identity is carried, so no like is removed.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/likes",
    tag = "likes",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Accepted; likes are left unchanged"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn unlike_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());

    let result = service.unlike_post(&post_id).await;
    record_operation("unlike_post", &result);
    result?;

    Ok(HttpResponse::NoContent().finish())
}
