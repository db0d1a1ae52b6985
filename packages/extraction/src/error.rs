//! Typed errors for the link extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the orchestrator can
//! inspect failure kinds instead of matching on strings.

use thiserror::Error;

/// Boxed error used where the underlying cause comes from a foreign crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that end a `read_link` request.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The request carried no `url` field
    #[error("Missing 'url' in request body")]
    MissingUrl,

    /// The URL lacks a scheme or an authority
    #[error("Invalid URL provided.")]
    InvalidUrl { url: String },

    /// The id is well-formed but the metadata API knows no such video
    #[error("Video not found or unavailable.")]
    VideoNotFound { video_id: String },

    /// Anything else that went wrong while extracting a video
    #[error("An error occurred: {source}")]
    ExtractionFailed {
        video_id: String,
        #[source]
        source: ProviderError,
    },

    /// Fetching a webpage failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ExtractionError {
    /// Classify this error into the response taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::MissingUrl | ExtractionError::InvalidUrl { .. } => {
                ErrorKind::InvalidInput
            }
            ExtractionError::VideoNotFound { .. } => ErrorKind::NotFound,
            ExtractionError::ExtractionFailed { .. } => ErrorKind::ExtractionFailed,
            ExtractionError::Fetch(e) => e.kind(),
        }
    }
}

/// Closed set of failure kinds the normalizer maps onto response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    ExtractionFailed,
    Timeout,
    ConnectionError,
    UpstreamHttpError(u16),
    Unexpected,
}

/// Transport failures from fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded its time bound
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// DNS, TCP or TLS setup failed
    #[error("failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status
    #[error("{status} {reason} for url: {url}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    /// Any other transport failure
    #[error("{source}")]
    Other {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl FetchError {
    /// Build an `HttpStatus` error, filling the reason phrase from the code.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        FetchError::HttpStatus {
            url: url.into(),
            status,
            reason,
        }
    }

    /// Classify a reqwest error into a fetch failure kind.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            FetchError::Connection {
                url: url.to_string(),
                source: Box::new(error),
            }
        } else if let Some(status) = error.status() {
            FetchError::http_status(url, status.as_u16())
        } else {
            FetchError::Other {
                url: url.to_string(),
                source: Box::new(error),
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Timeout { .. } => ErrorKind::Timeout,
            FetchError::Connection { .. } => ErrorKind::ConnectionError,
            FetchError::HttpStatus { status, .. } => ErrorKind::UpstreamHttpError(*status),
            FetchError::Other { .. } => ErrorKind::Unexpected,
        }
    }

    /// The URL that was being fetched.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Connection { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Other { url, .. } => url,
        }
    }
}

/// Errors from the video metadata provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured for the metadata API
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    /// The call never produced a usable response
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// The API answered with an error document
    #[error("YouTube API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}

/// Reasons a transcript could not be retrieved.
///
/// None of these fail a video extraction; they become placeholder text.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The owner turned captions off
    #[error("Subtitles are disabled for this video")]
    Disabled { video_id: String },

    /// Captions exist but none in the requested languages
    #[error("No transcripts were found for any of the requested language codes: {languages:?}")]
    NotFound {
        video_id: String,
        languages: Vec<String>,
    },

    /// YouTube is throttling this client
    #[error("YouTube is receiving too many requests from this IP and now requires solving a captcha")]
    RateLimited { video_id: String },

    /// The watch page reports the video as unplayable
    #[error("The video is no longer available: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error(transparent)]
    Transport(#[from] FetchError),

    /// Caption discovery or timed-text parsing failed
    #[error("failed to parse transcript data: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for TranscriptError {
    fn from(e: serde_json::Error) -> Self {
        TranscriptError::Parse(e.to_string())
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for document fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for metadata lookups.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for transcript retrieval.
pub type TranscriptResult<T> = std::result::Result<T, TranscriptError>;
