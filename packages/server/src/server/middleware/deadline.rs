// Whole-request deadline
//
// Sits above the per-call client timeouts, so it only fires when a request
// chains more slow calls than the configured bound allows.
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tracing::warn;

use crate::server::error::ApiError;

/// Run the rest of the stack, answering with the JSON timeout envelope if
/// it does not finish within `deadline`.
pub async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_owned();

    tokio::time::timeout(deadline, next.run(request))
        .await
        .map_err(|_| {
            warn!(path = %path, deadline_secs = deadline.as_secs(), "Request deadline exceeded");
            ApiError::Timeout
        })
}
