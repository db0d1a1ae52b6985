//! Document fetcher trait.
//!
//! The webpage extractor never talks to the network directly; it asks a
//! `DocumentFetcher` for the raw body so transport failures arrive already
//! classified and tests can substitute canned documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchResult;

/// A fetched document before any HTML processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedDocument {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    /// HTTP status of the final response
    pub status: u16,

    /// MIME type if the server sent one
    pub content_type: Option<String>,

    /// Raw response body
    pub body: String,

    pub fetched_at: DateTime<Utc>,
}

impl FetchedDocument {
    /// Create a 200 response for `url` with the given body.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            status: 200,
            content_type: None,
            body: body.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

/// Fetches a single document with a bounded timeout.
///
/// Implementations must map every failure onto one `FetchError` variant;
/// a non-success status is an error, not a document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedDocument>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_document_builder() {
        let doc = FetchedDocument::new("http://example.com", "<p>hi</p>")
            .with_final_url("https://www.example.com/")
            .with_content_type("text/html; charset=utf-8");

        assert_eq!(doc.url, "http://example.com");
        assert_eq!(doc.final_url, "https://www.example.com/");
        assert_eq!(doc.status, 200);
        assert_eq!(doc.content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert_eq!(doc.content_length(), 9);
    }
}
