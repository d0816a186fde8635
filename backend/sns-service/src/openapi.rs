/// OpenAPI documentation for the SNS service
use crate::handlers::{comments, health, likes, posts};
use crate::models::{
    Comment, LikeRequest, LikeResponse, NewCommentRequest, NewPostRequest, Post, ServiceInfo,
    UpdateCommentRequest, UpdatePostRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Simple Social Media API",
        description = "A basic Social Networking Service (SNS) API. Users publish short posts, comment on them and like them; comment and like counts are kept on each post.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    paths(
        health::service_info,
        health::health_summary,
        health::readiness_summary,
        posts::list_posts,
        posts::create_post,
        posts::get_post,
        posts::update_post,
        posts::delete_post,
        comments::list_comments,
        comments::create_comment,
        comments::get_comment,
        comments::update_comment,
        comments::delete_comment,
        likes::like_post,
        likes::unlike_post,
    ),
    components(schemas(
        Post,
        Comment,
        LikeResponse,
        ServiceInfo,
        NewPostRequest,
        UpdatePostRequest,
        NewCommentRequest,
        UpdateCommentRequest,
        LikeRequest,
    )),
    tags(
        (name = "health", description = "Service metadata and health checks"),
        (name = "posts", description = "Post creation, retrieval, updates, and deletion"),
        (name = "comments", description = "Comments on posts"),
        (name = "likes", description = "Likes on posts"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/openapi.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_api_paths() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Simple Social Media API");
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
        assert!(doc.paths.paths.contains_key("/api/posts"));
        assert!(doc.paths.paths.contains_key("/api/posts/{post_id}/comments/{comment_id}"));
        assert!(doc.paths.paths.contains_key("/api/posts/{post_id}/likes"));
    }
}
