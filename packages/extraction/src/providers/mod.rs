//! Provider implementations for the collaborator traits.
//!
//! # Available Providers
//!
//! - `HttpFetcher` - webpage fetches over reqwest
//! - `YouTubeDataApi` - video metadata from the YouTube Data API v3
//! - `YouTubeCaptions` - transcripts from YouTube caption tracks
//! - `MockFetcher` - For testing
//!
//! # Example
//!
//! ```rust,ignore
//! use link_extraction::providers::{HttpFetcher, YouTubeCaptions, YouTubeDataApi};
//! use link_extraction::ExtractorConfig;
//!
//! let config = ExtractorConfig::default();
//! let fetcher = HttpFetcher::new(&config)?;
//! let metadata = YouTubeDataApi::new(Some(api_key.into()), &config)?;
//! let transcripts = YouTubeCaptions::new(&config)?;
//! ```

mod http;
mod mock;
mod youtube_captions;
mod youtube_data;

pub use http::HttpFetcher;
pub use mock::{MockFailure, MockFetcher};
pub use youtube_captions::YouTubeCaptions;
pub use youtube_data::YouTubeDataApi;

// Re-export from traits for convenience
pub use crate::traits::{
    fetcher::{DocumentFetcher, FetchedDocument},
    metadata::MetadataProvider,
    transcript::TranscriptProvider,
};
