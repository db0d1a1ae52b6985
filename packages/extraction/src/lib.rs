//! Link Extraction Library
//!
//! Turns an arbitrary URL into a normalized `{url, content, summary}` record:
//! YouTube links become video metadata plus a transcript, every other page
//! becomes the text of its headings and paragraphs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use link_extraction::{ExtractorConfig, HttpFetcher, LinkReader, YouTubeCaptions, YouTubeDataApi};
//!
//! let config = ExtractorConfig::default();
//! let reader = LinkReader::new(
//!     Arc::new(HttpFetcher::new(&config)?),
//!     Arc::new(YouTubeDataApi::new(api_key, &config)?),
//!     Arc::new(YouTubeCaptions::new(&config)?),
//! );
//!
//! let response = reader.read_link(Some("https://youtu.be/dQw4w9WgXcQ")).await;
//! println!("{}", serde_json::to_string(&response.body)?);
//! ```
//!
//! # Modules
//!
//! - [`classifier`] - URL validation and YouTube/webpage classification
//! - [`traits`] - Collaborator abstractions (fetcher, metadata, transcripts)
//! - [`types`] - Video data, response envelope and configuration
//! - [`pipeline`] - Extractors, normalizer and the `LinkReader` orchestrator
//! - [`providers`] - reqwest-backed implementations of the traits
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use classifier::{classify, extract_video_identifier, is_well_formed, LinkKind};
pub use error::{
    ErrorKind, ExtractionError, FetchError, ProviderError, Result, TranscriptError,
};
pub use traits::{
    fetcher::{DocumentFetcher, FetchedDocument},
    metadata::MetadataProvider,
    transcript::TranscriptProvider,
};
pub use types::{
    config::ExtractorConfig,
    response::{Extraction, ExtractionResponse, NormalizedResponse, ReadLinkRequest},
    video::{TranscriptFormat, TranscriptSegment, VideoId, VideoMetadata, NOT_AVAILABLE},
};

// Re-export pipeline components
pub use pipeline::{
    count_tokens, extract_meaningful_text, normalize, status_for, LinkReader, Stage,
    WebpageExtractor, YouTubeExtractor,
};

// Re-export providers
pub use providers::{HttpFetcher, MockFetcher, YouTubeCaptions, YouTubeDataApi};

pub use security::SecretString;

// Re-export testing utilities
pub use testing::{MockMetadataProvider, MockTranscriptProvider, TestScenario};
