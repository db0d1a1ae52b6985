//! The `read_link` pipeline.
//!
//! `Received → Validated → Classified → Extracted → Normalized → Responded`,
//! with `ErrorResponded` reachable from validation and extraction. Linear:
//! no retries, and a YouTube link that fails is never retried as a webpage.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::classifier::{classify, is_well_formed, LinkKind};
use crate::error::{ExtractionError, Result};
use crate::pipeline::normalize::normalize;
use crate::pipeline::webpage::WebpageExtractor;
use crate::pipeline::youtube::YouTubeExtractor;
use crate::traits::fetcher::DocumentFetcher;
use crate::traits::metadata::MetadataProvider;
use crate::traits::transcript::TranscriptProvider;
use crate::types::response::{Extraction, NormalizedResponse};
use crate::types::video::TranscriptFormat;

/// Pipeline stages, recorded in the request's trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Classified,
    Extracted,
    Normalized,
    Responded,
    ErrorResponded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Classified => "classified",
            Stage::Extracted => "extracted",
            Stage::Normalized => "normalized",
            Stage::Responded => "responded",
            Stage::ErrorResponded => "error_responded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates, classifies and dispatches a URL to the matching extractor.
///
/// Holds no per-request state; one instance serves every request.
///
/// # Example
///
/// ```rust,ignore
/// use link_extraction::LinkReader;
///
/// let reader = LinkReader::new(fetcher, metadata, transcripts);
/// let response = reader.read_link(Some("https://example.com")).await;
/// assert_eq!(response.status, 200);
/// ```
pub struct LinkReader {
    youtube: YouTubeExtractor,
    webpage: WebpageExtractor,
    transcript_format: TranscriptFormat,
}

impl LinkReader {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
    ) -> Self {
        Self {
            youtube: YouTubeExtractor::new(metadata, transcripts),
            webpage: WebpageExtractor::new(fetcher),
            transcript_format: TranscriptFormat::default(),
        }
    }

    /// Render transcripts with this format (plain text unless changed).
    pub fn with_transcript_format(mut self, format: TranscriptFormat) -> Self {
        self.transcript_format = format;
        self
    }

    pub fn transcript_format(&self) -> TranscriptFormat {
        self.transcript_format
    }

    /// Run the pipeline up to extraction.
    ///
    /// Malformed or missing URLs are rejected before any provider is called.
    pub async fn extract(&self, url: Option<&str>) -> Result<Extraction> {
        debug!(stage = %Stage::Received, url = ?url, "read_link");

        let url = url.ok_or(ExtractionError::MissingUrl)?;
        if !is_well_formed(url) {
            return Err(ExtractionError::InvalidUrl {
                url: url.to_string(),
            });
        }
        debug!(stage = %Stage::Validated, url = %url, "read_link");

        let kind = classify(url);
        debug!(stage = %Stage::Classified, url = %url, kind = kind.label(), "read_link");

        let extraction = match kind {
            LinkKind::YouTube(id) => {
                self.youtube
                    .extract(url, &id, self.transcript_format)
                    .await?
            }
            LinkKind::Webpage => self.webpage.extract(url).await?,
        };
        debug!(stage = %Stage::Extracted, url = %url, summary = %extraction.summary, "read_link");

        Ok(extraction)
    }

    /// Run the whole pipeline; every outcome becomes a response envelope.
    pub async fn read_link(&self, url: Option<&str>) -> NormalizedResponse {
        let outcome = self.extract(url).await;
        let response = normalize(outcome);
        debug!(stage = %Stage::Normalized, status = response.status, "read_link");

        let stage = if response.body.is_success() {
            Stage::Responded
        } else {
            Stage::ErrorResponded
        };

        match response.body.error() {
            Some(error) => warn!(stage = %stage, status = response.status, error = %error, "read_link failed"),
            None => info!(stage = %stage, status = response.status, "read_link complete"),
        }

        response
    }
}
