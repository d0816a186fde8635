/// Error types for SNS Service
///
/// Every failure a request can hit maps to one of three kinds: the referenced
/// resource is missing, the payload is invalid, or the store failed. Errors are
/// converted to `error_types::ErrorResponse` bodies; store details are logged,
/// never returned.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use error_types::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for sns-service operations
pub type Result<T> = std::result::Result<T, AppError>;

pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found";
const VALIDATION_MESSAGE: &str = "The request payload is invalid";
const INTERNAL_MESSAGE: &str = "An internal server error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    /// Post or comment absent, or comment addressed through the wrong post
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Field constraint or body shape violation
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let reason = status.canonical_reason().unwrap_or("Error");

        let body = match self {
            AppError::NotFound => ErrorResponse::new(
                reason,
                NOT_FOUND_MESSAGE,
                status.as_u16(),
                error_codes::RESOURCE_NOT_FOUND,
            ),
            AppError::Validation(details) => ErrorResponse::new(
                reason,
                VALIDATION_MESSAGE,
                status.as_u16(),
                error_codes::VALIDATION_ERROR,
            )
            .with_details(details.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Store operation failed");
                ErrorResponse::new(
                    reason,
                    INTERNAL_MESSAGE,
                    status.as_u16(),
                    error_codes::DATABASE_ERROR,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorResponse::new(
                    reason,
                    INTERNAL_MESSAGE,
                    status.as_u16(),
                    error_codes::INTERNAL_SERVER_ERROR,
                )
            }
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, err.code),
                })
            })
            .collect();
        details.sort();

        AppError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> serde_json::Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_rt::test]
    async fn test_not_found_body_is_generic() {
        let json = body_json(AppError::NotFound).await;

        assert_eq!(json["message"], NOT_FOUND_MESSAGE);
        assert_eq!(json["status"], 404);
        assert_eq!(json["code"], error_codes::RESOURCE_NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_database_error_not_leaked() {
        let json = body_json(AppError::Database(sqlx::Error::Protocol(
            "posts table is on fire".to_string(),
        )))
        .await;

        assert_eq!(json["status"], 500);
        assert!(!json.to_string().contains("on fire"));
    }

    #[actix_rt::test]
    async fn test_internal_error_is_generic() {
        let err = AppError::Internal("OpenAPI serialization failed: recursion limit".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(err).await;
        assert_eq!(json["status"], 500);
        assert_eq!(json["code"], error_codes::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], INTERNAL_MESSAGE);
        assert!(!json.to_string().contains("recursion"));
    }

    #[actix_rt::test]
    async fn test_validation_details_carried() {
        let json = body_json(AppError::Validation(vec![
            "content must be 1-2000 characters".to_string(),
        ]))
        .await;

        assert_eq!(json["status"], 422);
        assert_eq!(json["details"][0], "content must be 1-2000 characters");
    }
}
