//! The normalized response contract shared by both extraction paths.

use serde::{Deserialize, Serialize};

/// Body of a `read_link` call. `url` stays optional so a missing field is
/// reported as such rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadLinkRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Successful output of either extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub url: String,

    /// Formatted content block; never empty after trimming
    pub content: String,

    /// Always `Token count: {n}`
    pub summary: String,
}

impl Extraction {
    pub fn new(url: impl Into<String>, content: impl Into<String>, token_count: usize) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            summary: token_summary(token_count),
        }
    }
}

/// The summary line carried by every successful result.
pub fn token_summary(token_count: usize) -> String {
    format!("Token count: {}", token_count)
}

/// JSON body returned to the caller: `{url, content, summary}` or `{error, code?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResponse {
    Success(Extraction),
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<u16>,
    },
}

impl ExtractionResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        ExtractionResponse::Failure {
            error: error.into(),
            code: None,
        }
    }

    pub fn failure_with_code(error: impl Into<String>, code: u16) -> Self {
        ExtractionResponse::Failure {
            error: error.into(),
            code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResponse::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResponse::Failure { error, .. } => Some(error),
            ExtractionResponse::Success(_) => None,
        }
    }
}

/// A response body paired with the HTTP status it should be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResponse {
    pub status: u16,
    pub body: ExtractionResponse,
}
