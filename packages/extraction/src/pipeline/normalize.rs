//! Maps pipeline outcomes onto the response envelope and its HTTP status.

use crate::error::{ErrorKind, ExtractionError, FetchError, Result};
use crate::types::response::{Extraction, ExtractionResponse, NormalizedResponse};

/// HTTP status a failure of `kind` is sent with.
///
/// YouTube failures keep a 200 envelope; only input and transport failures
/// change the status line.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::InvalidInput => 400,
        ErrorKind::NotFound | ErrorKind::ExtractionFailed => 200,
        ErrorKind::Timeout => 408,
        ErrorKind::ConnectionError => 503,
        ErrorKind::UpstreamHttpError(status) => status,
        ErrorKind::Unexpected => 500,
    }
}

pub fn normalize(outcome: Result<Extraction>) -> NormalizedResponse {
    match outcome {
        Ok(extraction) => NormalizedResponse {
            status: 200,
            body: ExtractionResponse::Success(extraction),
        },
        Err(error) => normalize_error(&error),
    }
}

pub fn normalize_error(error: &ExtractionError) -> NormalizedResponse {
    let status = status_for(error.kind());

    let body = match error {
        ExtractionError::MissingUrl
        | ExtractionError::InvalidUrl { .. }
        | ExtractionError::VideoNotFound { .. }
        | ExtractionError::ExtractionFailed { .. } => {
            ExtractionResponse::failure(error.to_string())
        }
        ExtractionError::Fetch(fetch) => {
            ExtractionResponse::failure_with_code(fetch_message(fetch), status)
        }
    };

    NormalizedResponse { status, body }
}

fn fetch_message(error: &FetchError) -> String {
    match error {
        FetchError::Timeout { .. } => "The request timed out.".to_string(),
        FetchError::Connection { .. } => "Failed to connect to the server.".to_string(),
        FetchError::HttpStatus { .. } => format!("HTTP error occurred: {}", error),
        FetchError::Other { .. } => {
            format!("An error occurred while processing the request: {}", error)
        }
    }
}
