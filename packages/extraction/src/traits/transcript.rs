//! Transcript provider trait.

use async_trait::async_trait;

use crate::error::TranscriptResult;
use crate::types::video::{TranscriptSegment, VideoId};

/// Retrieves the ordered caption segments for a video.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn transcript(&self, id: &VideoId) -> TranscriptResult<Vec<TranscriptSegment>>;

    fn name(&self) -> &str {
        "unknown"
    }
}
