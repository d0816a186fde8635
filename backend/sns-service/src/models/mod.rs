/// Data models for sns-service
///
/// This module defines structures for:
/// - Post: Short text posts carrying denormalized like/comment counters
/// - Comment: Comments owned by a post
/// - Like: At most one per (post, username)
///
/// Request payloads and their validation rules live in [`requests`].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod requests;

pub use requests::{
    LikeRequest, NewCommentRequest, NewPostRequest, UpdateCommentRequest, UpdatePostRequest,
};

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of likes referencing this post
    pub likes_count: i64,
    /// Number of comments referencing this post
    pub comments_count: i64,
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like entity - represents a username liking a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub liked_at: DateTime<Utc>,
}

/// Public projection of a [`Like`]; the row id never leaves the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub post_id: String,
    pub username: String,
    pub liked_at: DateTime<Utc>,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            post_id: like.post_id,
            username: like.username,
            liked_at: like.liked_at,
        }
    }
}

/// Service metadata returned from `GET /`
///
/// Only the machine-readable OpenAPI document is published; there is no
/// interactive documentation page, so no `docs_url` is advertised.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    pub openapi_url: String,
}
