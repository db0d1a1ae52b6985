use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use link_extraction::ReadLinkRequest;
use tracing::{debug, info};

use crate::server::app::AppState;

/// Read a link: `POST /read_link` with `{"url": "..."}`.
///
/// A body that is not a JSON object is treated as one without a `url`, so the
/// caller gets the same 400 either way.
pub async fn read_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReadLinkRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable read_link body");
            ReadLinkRequest::default()
        }
    };

    info!(url = ?request.url, "Processing request");

    let response = state.reader.read_link(request.url.as_deref()).await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(response.body)).into_response()
}
