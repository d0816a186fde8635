//! Shared error response body for SNS services
//!
//! Every HTTP error leaves the service as an [`ErrorResponse`] so clients can
//! rely on one shape regardless of which handler failed.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error codes
pub mod error_codes {
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// JSON error body returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP reason phrase ("Not Found", "Unprocessable Entity", ...)
    pub error: String,
    /// Human readable message, never carries internal detail
    pub message: String,
    /// HTTP status code
    pub status: u16,
    /// Stable code from [`error_codes`]
    pub code: String,
    /// Per-field problems for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            code: code.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_omitted_when_absent() {
        let body = ErrorResponse::new(
            "Not Found",
            "The requested resource was not found",
            404,
            error_codes::RESOURCE_NOT_FOUND,
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["code"], "RESOURCE_NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_details_serialized() {
        let body = ErrorResponse::new("Unprocessable Entity", "Validation failed", 422, "X")
            .with_details(vec!["username: length".to_string()]);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"][0], "username: length");
    }
}
