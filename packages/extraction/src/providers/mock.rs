//! Mock document fetcher for testing.
//!
//! Provides a configurable mock implementation of the DocumentFetcher trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{DocumentFetcher, FetchedDocument};

/// A transport failure the mock should produce for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    Timeout,
    Connection,
    HttpStatus(u16),
    Other(String),
}

impl MockFailure {
    fn to_error(&self, url: &str) -> FetchError {
        match self {
            MockFailure::Timeout => FetchError::Timeout {
                url: url.to_string(),
            },
            MockFailure::Connection => FetchError::Connection {
                url: url.to_string(),
                source: "connection refused".into(),
            },
            MockFailure::HttpStatus(status) => FetchError::http_status(url, *status),
            MockFailure::Other(reason) => FetchError::Other {
                url: url.to_string(),
                source: reason.clone().into(),
            },
        }
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Document(FetchedDocument),
    Failure(MockFailure),
}

/// Mock fetcher with canned documents and failures keyed by URL.
///
/// Unknown URLs answer with a 404.
///
/// # Example
///
/// ```rust
/// use link_extraction::providers::MockFetcher;
///
/// let fetcher = MockFetcher::new().with_html("https://example.com", "<p>Hello</p>");
/// ```
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn add_html(&self, url: impl Into<String>, html: impl Into<String>) {
        let url = url.into();
        let document = FetchedDocument::new(url.clone(), html).with_content_type("text/html");
        self.responses
            .write()
            .unwrap()
            .insert(url, MockResponse::Document(document));
    }

    /// Fail every fetch of `url` with `failure`.
    pub fn add_failure(&self, url: impl Into<String>, failure: MockFailure) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Failure(failure));
    }

    pub fn with_html(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add_html(url, html);
        self
    }

    pub fn with_failure(self, url: impl Into<String>, failure: MockFailure) -> Self {
        self.add_failure(url, failure);
        self
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.read().unwrap().len()
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.fetch_calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedDocument> {
        self.fetch_calls.write().unwrap().push(url.to_string());

        let responses = self.responses.read().unwrap();
        match responses.get(url) {
            Some(MockResponse::Document(doc)) => Ok(doc.clone()),
            Some(MockResponse::Failure(failure)) => Err(failure.to_error(url)),
            None => Err(FetchError::http_status(url, 404)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
