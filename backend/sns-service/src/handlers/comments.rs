/// Comment handlers - HTTP endpoints for comment operations
///
/// Comments are always addressed through their post.
use crate::error::Result;
use crate::metrics::record_operation;
use crate::models::{Comment, NewCommentRequest, UpdateCommentRequest};
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

/// List comments of a post
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    tag = "comments",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments in insertion order", body = [Comment]),
        (status = 404, description = "Post not found")
    )
)]
pub async fn list_comments(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());

    let result = service.list_comments(&post_id).await;
    record_operation("list_comments", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Add a comment to a post
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    tag = "comments",
    params(("post_id" = String, Path, description = "Post id")),
    request_body = NewCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_comment(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
    req: web::Json<NewCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let result = service
        .create_comment(&post_id, &req.username, &req.content)
        .await;
    record_operation("create_comment", &result);

    Ok(HttpResponse::Created().json(result?))
}

/// Get one comment of a post
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment found", body = Comment),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn get_comment(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());

    let result = service.get_comment(&post_id, &comment_id).await;
    record_operation("get_comment", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Replace username and content of a comment
#[utoipa::path(
    patch,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 404, description = "Post or comment not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_comment(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let result = service
        .update_comment(&post_id, &comment_id, &req.username, &req.content)
        .await;
    record_operation("update_comment", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn delete_comment(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());

    let result = service.delete_comment(&post_id, &comment_id).await;
    record_operation("delete_comment", &result);
    result?;

    Ok(HttpResponse::NoContent().finish())
}
