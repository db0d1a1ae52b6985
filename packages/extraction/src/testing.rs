//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the extraction library
//! without calling the YouTube APIs or fetching real pages.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, ProviderError, ProviderResult, TranscriptError, TranscriptResult};
use crate::pipeline::LinkReader;
use crate::providers::MockFetcher;
use crate::traits::{metadata::MetadataProvider, transcript::TranscriptProvider};
use crate::types::video::{TranscriptFormat, TranscriptSegment, VideoId, VideoMetadata};

/// Failure the mock metadata provider should return for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataFailure {
    MissingApiKey,
    Api { status: u16, message: String },
    Timeout,
    Decode(String),
}

impl MetadataFailure {
    fn to_error(&self, id: &VideoId) -> ProviderError {
        match self {
            MetadataFailure::MissingApiKey => ProviderError::MissingApiKey,
            MetadataFailure::Api { status, message } => ProviderError::Api {
                status: *status,
                message: message.clone(),
            },
            MetadataFailure::Timeout => ProviderError::Transport(FetchError::Timeout {
                url: id.watch_url(),
            }),
            MetadataFailure::Decode(reason) => ProviderError::Decode(reason.clone()),
        }
    }
}

#[derive(Debug, Clone)]
enum MetadataResponse {
    Video(VideoMetadata),
    Failure(MetadataFailure),
}

/// A mock metadata provider keyed by video id.
///
/// Unknown ids behave like the real API with an empty `items` list: `Ok(None)`.
#[derive(Default)]
pub struct MockMetadataProvider {
    responses: Arc<RwLock<HashMap<String, MetadataResponse>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_video(&self, id: impl Into<String>, metadata: VideoMetadata) {
        self.responses
            .write()
            .unwrap()
            .insert(id.into(), MetadataResponse::Video(metadata));
    }

    pub fn add_failure(&self, id: impl Into<String>, failure: MetadataFailure) {
        self.responses
            .write()
            .unwrap()
            .insert(id.into(), MetadataResponse::Failure(failure));
    }

    pub fn with_video(self, id: impl Into<String>, metadata: VideoMetadata) -> Self {
        self.add_video(id, metadata);
        self
    }

    pub fn with_failure(self, id: impl Into<String>, failure: MetadataFailure) -> Self {
        self.add_failure(id, failure);
        self
    }

    /// Ids looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockMetadataProvider {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn video(&self, id: &VideoId) -> ProviderResult<Option<VideoMetadata>> {
        self.calls.write().unwrap().push(id.to_string());

        match self.responses.read().unwrap().get(id.as_str()) {
            Some(MetadataResponse::Video(metadata)) => Ok(Some(metadata.clone())),
            Some(MetadataResponse::Failure(failure)) => Err(failure.to_error(id)),
            None => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Failure the mock transcript provider should return for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptFailure {
    Disabled,
    NotFound,
    RateLimited,
    Unavailable(String),
}

impl TranscriptFailure {
    fn to_error(&self, id: &VideoId) -> TranscriptError {
        let video_id = id.to_string();
        match self {
            TranscriptFailure::Disabled => TranscriptError::Disabled { video_id },
            TranscriptFailure::NotFound => TranscriptError::NotFound {
                video_id,
                languages: vec!["en".to_string()],
            },
            TranscriptFailure::RateLimited => TranscriptError::RateLimited { video_id },
            TranscriptFailure::Unavailable(reason) => TranscriptError::VideoUnavailable {
                video_id,
                reason: reason.clone(),
            },
        }
    }
}

/// A mock transcript provider keyed by video id.
///
/// Unknown ids fall back to the default transcript, or to `Disabled` when
/// none was set.
#[derive(Default)]
pub struct MockTranscriptProvider {
    transcripts: Arc<RwLock<HashMap<String, Vec<TranscriptSegment>>>>,
    failures: Arc<RwLock<HashMap<String, TranscriptFailure>>>,
    default_transcript: Arc<RwLock<Option<Vec<TranscriptSegment>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockTranscriptProvider {
    /// A provider that serves `sample_segments()` for every video.
    pub fn new() -> Self {
        let provider = Self::default();
        *provider.default_transcript.write().unwrap() = Some(sample_segments());
        provider
    }

    /// A provider with no transcripts at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_transcript(self, id: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        self.transcripts.write().unwrap().insert(id.into(), segments);
        self
    }

    pub fn with_failure(self, id: impl Into<String>, failure: TranscriptFailure) -> Self {
        self.failures.write().unwrap().insert(id.into(), failure);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockTranscriptProvider {
    fn clone(&self) -> Self {
        Self {
            transcripts: Arc::clone(&self.transcripts),
            failures: Arc::clone(&self.failures),
            default_transcript: Arc::clone(&self.default_transcript),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl TranscriptProvider for MockTranscriptProvider {
    async fn transcript(&self, id: &VideoId) -> TranscriptResult<Vec<TranscriptSegment>> {
        self.calls.write().unwrap().push(id.to_string());

        if let Some(failure) = self.failures.read().unwrap().get(id.as_str()) {
            return Err(failure.to_error(id));
        }

        if let Some(segments) = self.transcripts.read().unwrap().get(id.as_str()) {
            return Ok(segments.clone());
        }

        self.default_transcript
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| TranscriptError::Disabled {
                video_id: id.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Metadata for a fictional but fully-populated video.
pub fn sample_metadata() -> VideoMetadata {
    VideoMetadata {
        title: "Building a Link Extractor".to_string(),
        creator: "Belto".to_string(),
        description: "How we turn links into text.".to_string(),
        published_at: "2024-03-01T12:00:00Z".to_string(),
        tags: vec!["rust".to_string(), "scraping".to_string()],
        category_id: "28".to_string(),
        likes: Some("120".to_string()),
        views: Some("4500".to_string()),
        comments: Some("17".to_string()),
        duration: "PT4M13S".to_string(),
    }
}

/// A three-segment transcript with eight words in total.
pub fn sample_segments() -> Vec<TranscriptSegment> {
    vec![
        TranscriptSegment::new(0.0, "welcome back everyone").with_duration(2.1),
        TranscriptSegment::new(2.1, "today we extract").with_duration(1.9),
        TranscriptSegment::new(4.0, "some links").with_duration(1.5),
    ]
}

/// Builder for a `LinkReader` wired to mocks.
///
/// # Example
///
/// ```rust
/// use link_extraction::testing::{sample_metadata, TestScenario};
///
/// let scenario = TestScenario::new()
///     .with_page("https://example.com", "<p>Hello world</p>")
///     .with_video("dQw4w9WgXcQ", sample_metadata());
/// let reader = scenario.reader();
/// ```
pub struct TestScenario {
    fetcher: MockFetcher,
    metadata: MockMetadataProvider,
    transcripts: MockTranscriptProvider,
    format: TranscriptFormat,
}

impl TestScenario {
    pub fn new() -> Self {
        Self {
            fetcher: MockFetcher::new(),
            metadata: MockMetadataProvider::new(),
            transcripts: MockTranscriptProvider::new(),
            format: TranscriptFormat::PlainText,
        }
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.fetcher.add_html(url, html);
        self
    }

    pub fn with_video(self, id: &str, metadata: VideoMetadata) -> Self {
        self.metadata.add_video(id, metadata);
        self
    }

    pub fn with_transcripts(mut self, transcripts: MockTranscriptProvider) -> Self {
        self.transcripts = transcripts;
        self
    }

    pub fn with_fetcher(mut self, fetcher: MockFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_transcript_format(mut self, format: TranscriptFormat) -> Self {
        self.format = format;
        self
    }

    /// A reader sharing state with this scenario's mocks.
    pub fn reader(&self) -> LinkReader {
        LinkReader::new(
            Arc::new(self.fetcher.clone()),
            Arc::new(self.metadata.clone()),
            Arc::new(self.transcripts.clone()),
        )
        .with_transcript_format(self.format)
    }

    pub fn fetcher(&self) -> &MockFetcher {
        &self.fetcher
    }

    pub fn metadata(&self) -> &MockMetadataProvider {
        &self.metadata
    }

    pub fn transcripts(&self) -> &MockTranscriptProvider {
        &self.transcripts
    }
}

impl Default for TestScenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> VideoId {
        VideoId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_mock_metadata_lookup() {
        let provider = MockMetadataProvider::new().with_video("dQw4w9WgXcQ", sample_metadata());

        let found = provider.video(&id("dQw4w9WgXcQ")).await.unwrap();
        assert_eq!(found.unwrap().title, "Building a Link Extractor");

        let missing = provider.video(&id("aaaaaaaaaaa")).await.unwrap();
        assert!(missing.is_none());

        // Check calls were recorded
        assert_eq!(provider.calls(), vec!["dQw4w9WgXcQ", "aaaaaaaaaaa"]);
    }

    #[tokio::test]
    async fn test_mock_metadata_failure() {
        let provider = MockMetadataProvider::new().with_failure(
            "dQw4w9WgXcQ",
            MetadataFailure::Api {
                status: 403,
                message: "quota exceeded".into(),
            },
        );

        let err = provider.video(&id("dQw4w9WgXcQ")).await.unwrap_err();
        assert_eq!(err.to_string(), "YouTube API returned 403: quota exceeded");
    }

    #[tokio::test]
    async fn test_mock_transcripts() {
        let provider = MockTranscriptProvider::new()
            .with_failure("bbbbbbbbbbb", TranscriptFailure::Disabled);

        let segments = provider.transcript(&id("dQw4w9WgXcQ")).await.unwrap();
        assert_eq!(segments, sample_segments());

        let err = provider.transcript(&id("bbbbbbbbbbb")).await.unwrap_err();
        assert!(matches!(err, TranscriptError::Disabled { .. }));

        let empty = MockTranscriptProvider::empty();
        assert!(empty.transcript(&id("dQw4w9WgXcQ")).await.is_err());
    }

    #[tokio::test]
    async fn test_scenario_shares_state() {
        let scenario = TestScenario::new().with_page("https://example.com", "<p>Hi there</p>");
        let reader = scenario.reader();

        let extraction = reader.extract(Some("https://example.com")).await.unwrap();
        assert_eq!(extraction.summary, "Token count: 2");
        assert_eq!(scenario.fetcher().fetch_call_count(), 1);
        assert_eq!(scenario.metadata().call_count(), 0);
    }
}
