//! Request payloads and their field constraints.
//!
//! Lengths are counted in characters, not bytes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const USERNAME_MAX_CHARS: u64 = 50;
pub const POST_CONTENT_MAX_CHARS: u64 = 2000;
pub const COMMENT_CONTENT_MAX_CHARS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewPostRequest {
    #[validate(length(min = 1, max = USERNAME_MAX_CHARS, message = "username must be 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = POST_CONTENT_MAX_CHARS, message = "content must be 1-2000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = USERNAME_MAX_CHARS, message = "username must be 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = POST_CONTENT_MAX_CHARS, message = "content must be 1-2000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewCommentRequest {
    #[validate(length(min = 1, max = USERNAME_MAX_CHARS, message = "username must be 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = COMMENT_CONTENT_MAX_CHARS, message = "content must be 1-1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = USERNAME_MAX_CHARS, message = "username must be 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = COMMENT_CONTENT_MAX_CHARS, message = "content must be 1-1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LikeRequest {
    #[validate(length(min = 1, max = USERNAME_MAX_CHARS, message = "username must be 1-50 characters"))]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(n: u64) -> String {
        "a".repeat(n as usize)
    }

    #[test]
    fn test_post_request_username_bounds() {
        let mut req = NewPostRequest {
            username: String::new(),
            content: "hi".to_string(),
        };
        assert!(req.validate().is_err());

        req.username = chars(USERNAME_MAX_CHARS);
        assert!(req.validate().is_ok());

        req.username = chars(USERNAME_MAX_CHARS + 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_post_request_content_bounds() {
        let mut req = UpdatePostRequest {
            username: "alice".to_string(),
            content: chars(POST_CONTENT_MAX_CHARS),
        };
        assert!(req.validate().is_ok());

        req.content = chars(POST_CONTENT_MAX_CHARS + 1);
        assert!(req.validate().is_err());

        req.content = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_comment_content_is_shorter_than_post_content() {
        let mut req = NewCommentRequest {
            username: "bob".to_string(),
            content: chars(COMMENT_CONTENT_MAX_CHARS),
        };
        assert!(req.validate().is_ok());

        req.content = chars(COMMENT_CONTENT_MAX_CHARS + 1);
        assert!(req.validate().is_err());

        let update = UpdateCommentRequest {
            username: "bob".to_string(),
            content: chars(COMMENT_CONTENT_MAX_CHARS + 1),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_lengths_count_characters() {
        // 50 multi-byte characters, well over 50 bytes
        let req = LikeRequest {
            username: "é".repeat(25) + &"日".repeat(25),
        };
        assert!(req.username.len() > 50);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_limits_match_error_messages() {
        assert_eq!(USERNAME_MAX_CHARS, 50);
        assert_eq!(POST_CONTENT_MAX_CHARS, 2000);
        assert_eq!(COMMENT_CONTENT_MAX_CHARS, 1000);

        let req = LikeRequest {
            username: chars(USERNAME_MAX_CHARS + 1),
        };
        let errors = req.validate().unwrap_err();
        let messages: Vec<String> = errors.field_errors()["username"]
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        assert_eq!(messages, vec!["username must be 1-50 characters".to_string()]);
    }

    #[test]
    fn test_like_request_rejects_empty_username() {
        let req = LikeRequest {
            username: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().keys().any(|k| k.to_string() == "username"));
    }
}
