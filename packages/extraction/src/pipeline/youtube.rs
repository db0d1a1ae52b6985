//! YouTube extraction: metadata plus transcript in one labeled block.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::traits::metadata::MetadataProvider;
use crate::traits::transcript::TranscriptProvider;
use crate::types::response::Extraction;
use crate::types::video::{TranscriptFormat, TranscriptSegment, VideoId, VideoMetadata};

/// What ended up where the transcript goes.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptBody {
    Segments(Vec<TranscriptSegment>),

    /// Placeholder text explaining why there is no transcript
    Unavailable(String),
}

impl TranscriptBody {
    /// Sum of whitespace-delimited words across all segments.
    pub fn token_count(&self) -> usize {
        match self {
            TranscriptBody::Segments(segments) => {
                segments.iter().map(TranscriptSegment::word_count).sum()
            }
            TranscriptBody::Unavailable(_) => 0,
        }
    }

    pub fn render(&self, format: TranscriptFormat) -> String {
        match self {
            TranscriptBody::Unavailable(note) => note.clone(),
            TranscriptBody::Segments(segments) => match format {
                TranscriptFormat::PlainText => segments
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string(),
                TranscriptFormat::WithStartTimes => segments
                    .iter()
                    .map(|s| json!({ "start": s.start, "text": s.text }))
                    .collect::<serde_json::Value>()
                    .to_string(),
            },
        }
    }
}

/// Extracts metadata and transcript for a single video.
pub struct YouTubeExtractor {
    metadata: Arc<dyn MetadataProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
}

impl YouTubeExtractor {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
        }
    }

    /// Extract `id`, reporting `url` back as the result's URL.
    ///
    /// Metadata failures end the extraction; transcript failures only
    /// replace the transcript with a note.
    pub async fn extract(&self, url: &str, id: &VideoId, format: TranscriptFormat) -> Result<Extraction> {
        info!(video_id = %id, provider = self.metadata.name(), "Extracting YouTube video");

        let metadata = match self.metadata.video(id).await {
            Ok(Some(metadata)) => metadata,
            Ok(None) => {
                info!(video_id = %id, "Video not found");
                return Err(ExtractionError::VideoNotFound {
                    video_id: id.to_string(),
                });
            }
            Err(e) => {
                warn!(video_id = %id, error = %e, "Metadata lookup failed");
                return Err(ExtractionError::ExtractionFailed {
                    video_id: id.to_string(),
                    source: e,
                });
            }
        };

        let transcript = match self.transcripts.transcript(id).await {
            Ok(segments) => {
                debug!(video_id = %id, segments = segments.len(), "Transcript fetched");
                TranscriptBody::Segments(segments)
            }
            Err(e) => {
                warn!(video_id = %id, error = %e, "Continuing without transcript");
                TranscriptBody::Unavailable(format!("Could not fetch transcript: {}", e))
            }
        };

        let token_count = transcript.token_count();
        let content = format_video_content(&metadata, token_count, &transcript.render(format));

        Ok(Extraction::new(url, content, token_count))
    }
}

/// Render the labeled block. Field order is part of the response contract.
pub fn format_video_content(metadata: &VideoMetadata, token_count: usize, transcript: &str) -> String {
    let content = format!(
        "Title: {title}\n\
         Creator: {creator}\n\
         Description: {description}\n\
         Publish Date: {published}\n\
         Tags: {tags}\n\
         Category ID: {category}\n\
         Likes: {likes}\n\
         Views: {views}\n\
         Comments: {comments}\n\
         Duration: {duration}\n\
         Transcript Token Count: {token_count}\n\
         \n\
         Transcript:\n\
         {transcript}",
        title = metadata.title,
        creator = metadata.creator,
        description = metadata.description,
        published = metadata.published_at,
        tags = metadata.tags.join(", "),
        category = metadata.category_id,
        likes = metadata.likes_or_na(),
        views = metadata.views_or_na(),
        comments = metadata.comments_or_na(),
        duration = metadata.duration,
    );

    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, "hello there"),
            TranscriptSegment::new(1.5, " general  kenobi "),
        ]
    }

    #[test]
    fn test_plain_text_render() {
        let body = TranscriptBody::Segments(segments());
        assert_eq!(
            body.render(TranscriptFormat::PlainText),
            "hello there  general  kenobi"
        );
        assert_eq!(body.token_count(), 4);
    }

    #[test]
    fn test_start_times_render() {
        let body = TranscriptBody::Segments(segments());
        assert_eq!(
            body.render(TranscriptFormat::WithStartTimes),
            r#"[{"start":0.0,"text":"hello there"},{"start":1.5,"text":" general  kenobi "}]"#
        );
    }

    #[test]
    fn test_unavailable_render_ignores_format() {
        let body = TranscriptBody::Unavailable("Could not fetch transcript: nope".into());
        assert_eq!(body.token_count(), 0);
        assert_eq!(
            body.render(TranscriptFormat::PlainText),
            body.render(TranscriptFormat::WithStartTimes)
        );
    }

    #[test]
    fn test_format_video_content_order() {
        let metadata = VideoMetadata {
            title: "T".into(),
            creator: "C".into(),
            description: "D".into(),
            published_at: "2020-01-01T00:00:00Z".into(),
            tags: vec!["a".into(), "b".into()],
            category_id: "22".into(),
            likes: Some("5".into()),
            views: None,
            comments: Some("1".into()),
            duration: "PT1M".into(),
        };

        let content = format_video_content(&metadata, 3, "one two three");
        assert_eq!(
            content,
            "Title: T\n\
             Creator: C\n\
             Description: D\n\
             Publish Date: 2020-01-01T00:00:00Z\n\
             Tags: a, b\n\
             Category ID: 22\n\
             Likes: 5\n\
             Views: N/A\n\
             Comments: 1\n\
             Duration: PT1M\n\
             Transcript Token Count: 3\n\
             \n\
             Transcript:\n\
             one two three"
        );
    }
}
