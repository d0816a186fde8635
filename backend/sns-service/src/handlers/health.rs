/// Service metadata, health and OpenAPI endpoints
use crate::error::{AppError, Result};
use crate::models::ServiceInfo;
use crate::openapi::ApiDoc;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::time::Instant;

pub const SERVICE_TITLE: &str = "Simple Social Media API";
pub const SERVICE_DESCRIPTION: &str = "A basic Social Networking Service (SNS) API";

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

async fn ping(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Service metadata
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service metadata", body = ServiceInfo))
)]
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        title: SERVICE_TITLE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        openapi_url: ApiDoc::openapi_json_path().to_string(),
    })
}

/// Liveness plus a store ping
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and store are up"),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn health_summary(pool: web::Data<SqlitePool>) -> HttpResponse {
    match ping(&pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": crate::SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": crate::SERVICE_NAME
            }))
        }
    }
}

/// Readiness with per-component checks
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "A component is unhealthy")
    )
)]
pub async fn readiness_summary(pool: web::Data<SqlitePool>) -> HttpResponse {
    let mut checks = HashMap::new();

    let start = Instant::now();
    let result = ping(&pool).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    let ready = result.is_ok();
    let store_check = match result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "SQLite connection successful".to_string(),
            latency_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: "SQLite connection failed".to_string(),
                latency_ms,
            }
        }
    };
    checks.insert("sqlite".to_string(), store_check);

    let response = ReadinessResponse {
        ready,
        status: if ready {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Serve the generated OpenAPI document
pub async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> Result<HttpResponse> {
    let body = serde_json::to_string(&*doc)
        .map_err(|e| AppError::Internal(format!("OpenAPI serialization failed: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
