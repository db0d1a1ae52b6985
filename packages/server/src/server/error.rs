use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-gating failures, rendered as `{"error": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid or missing API key")]
    Forbidden,

    /// The whole request outran the server-side deadline.
    #[error("The request timed out.")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            // Same envelope as an upstream timeout, status line included.
            ApiError::Timeout => json!({ "error": self.to_string(), "code": status.as_u16() }),
            ApiError::Forbidden => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
