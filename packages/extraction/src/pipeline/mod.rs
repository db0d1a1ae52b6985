//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Validation and classification of the incoming URL
//! - YouTube extraction (metadata + transcript)
//! - Webpage extraction (headings and paragraphs)
//! - Normalization into one response envelope

pub mod normalize;
pub mod orchestrator;
pub mod webpage;
pub mod youtube;

pub use normalize::{normalize, normalize_error, status_for};
pub use orchestrator::{LinkReader, Stage};
pub use webpage::{extract_meaningful_text, webpage_content, WebpageExtractor};
pub use youtube::{format_video_content, TranscriptBody, YouTubeExtractor};

/// Whitespace-delimited word count, used as a coarse token estimate.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("   \n\t "), 0);
        assert_eq!(count_tokens("Hello world"), 2);
        assert_eq!(count_tokens(" one\ntwo\tthree  four "), 4);
    }
}
