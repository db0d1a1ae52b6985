//! Video metadata provider trait.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::video::{VideoId, VideoMetadata};

/// Looks up video metadata by id.
///
/// `Ok(None)` means the id is well-formed but no such video exists; callers
/// rely on that being distinct from a transport or API error.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn video(&self, id: &VideoId) -> ProviderResult<Option<VideoMetadata>>;

    fn name(&self) -> &str {
        "unknown"
    }
}
