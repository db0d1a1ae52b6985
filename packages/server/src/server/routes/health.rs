use axum::{http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    message: String,
    timestamp: DateTime<Utc>,
}

/// Health check endpoint
///
/// The service holds no connections or background workers, so being able to
/// answer is the whole check.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "The API is running properly.".to_string(),
            timestamp: Utc::now(),
        }),
    )
}
