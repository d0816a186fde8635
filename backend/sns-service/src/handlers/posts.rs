/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::metrics::record_operation;
use crate::models::{NewPostRequest, Post, UpdatePostRequest};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

/// List all posts
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in insertion order", body = [Post])
    )
)]
pub async fn list_posts(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());

    let result = service.list_posts().await;
    record_operation("list_posts", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = NewPostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_post(
    pool: web::Data<SqlitePool>,
    req: web::Json<NewPostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let result = service.create_post(&req.username, &req.content).await;
    record_operation("create_post", &result);

    Ok(HttpResponse::Created().json(result?))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());

    let result = service.get_post(&post_id).await;
    record_operation("get_post", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Replace username and content of a post
#[utoipa::path(
    patch,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(("post_id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let result = service
        .update_post(&post_id, &req.username, &req.content)
        .await;
    record_operation("update_post", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Delete a post with its comments and likes
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());

    let result = service.delete_post(&post_id).await;
    record_operation("delete_post", &result);
    result?;

    Ok(HttpResponse::NoContent().finish())
}
