//! Video identifiers, metadata and transcripts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered in place of a statistic the channel owner has hidden.
pub const NOT_AVAILABLE: &str = "N/A";

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// An 11-character YouTube video identifier.
///
/// Opaque; only the alphabet (`A-Z a-z 0-9 - _`) and length are checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap a raw id.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::parse(value.clone()).ok_or_else(|| format!("invalid video id: {}", value))
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Metadata for one video, as read from the data API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,

    /// Channel title
    pub creator: String,

    pub description: String,

    /// RFC 3339 timestamp exactly as the API reports it
    pub published_at: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub category_id: String,

    /// Counts are strings in the API and may be hidden by the owner
    pub likes: Option<String>,
    pub views: Option<String>,
    pub comments: Option<String>,

    /// ISO-8601 duration, e.g. `PT4M13S`
    pub duration: String,
}

impl VideoMetadata {
    pub fn likes_or_na(&self) -> &str {
        self.likes.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn views_or_na(&self) -> &str {
        self.views.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn comments_or_na(&self) -> &str {
        self.comments.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// One captioned unit of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds
    pub start: f64,

    /// How long the caption stays on screen, in seconds
    #[serde(default)]
    pub duration: f64,

    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration: 0.0,
            text: text.into(),
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Whitespace-delimited word count of this segment.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// How the transcript body is rendered into `content`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    /// Segment texts joined with single spaces
    #[default]
    PlainText,

    /// Ordered `{start, text}` pairs
    WithStartTimes,
}

impl TranscriptFormat {
    pub fn from_include_start_times(include_start_times: bool) -> Self {
        if include_start_times {
            TranscriptFormat::WithStartTimes
        } else {
            TranscriptFormat::PlainText
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_validation() {
        assert!(VideoId::parse("dQw4w9WgXcQ").is_some());
        assert!(VideoId::parse("abc-DEF_123").is_some());
        assert!(VideoId::parse("short").is_none());
        assert!(VideoId::parse("dQw4w9WgXcQx").is_none());
        assert!(VideoId::parse("dQw4w9WgX!Q").is_none());
    }

    #[test]
    fn test_counts_fall_back_to_sentinel() {
        let meta = VideoMetadata {
            views: Some("1024".into()),
            ..Default::default()
        };
        assert_eq!(meta.views_or_na(), "1024");
        assert_eq!(meta.likes_or_na(), NOT_AVAILABLE);
        assert_eq!(meta.comments_or_na(), NOT_AVAILABLE);
    }

    #[test]
    fn test_segment_word_count() {
        assert_eq!(TranscriptSegment::new(0.0, "  never gonna\n give ").word_count(), 3);
        assert_eq!(TranscriptSegment::new(1.5, "").word_count(), 0);
    }

    #[test]
    fn test_video_id_serde() {
        let id: VideoId = serde_json::from_str("\"dQw4w9WgXcQ\"").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert!(serde_json::from_str::<VideoId>("\"nope\"").is_err());
    }
}
