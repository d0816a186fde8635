//! Prometheus metrics for sns-service.
//!
//! Exposes an operation outcome counter and an HTTP handler for the
//! `/metrics` endpoint.

use crate::error::AppError;
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Operations handled, segmented by operation and outcome.
    pub static ref OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sns_operations_total",
        "Post/comment/like operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register sns_operations_total");
}

/// Count one operation by how it ended
pub fn record_operation<T>(operation: &str, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(AppError::NotFound) => "not_found",
        Err(AppError::Validation(_)) => "invalid",
        Err(_) => "error",
    };

    OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
