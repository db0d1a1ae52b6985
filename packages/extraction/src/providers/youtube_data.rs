//! YouTube Data API v3 metadata provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, ProviderError, ProviderResult};
use crate::security::SecretString;
use crate::traits::metadata::MetadataProvider;
use crate::types::config::ExtractorConfig;
use crate::types::video::{VideoId, VideoMetadata};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Facets requested for every lookup.
const VIDEO_PARTS: &str = "snippet,statistics,contentDetails";

/// Metadata provider backed by `videos.list`.
pub struct YouTubeDataApi {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl YouTubeDataApi {
    pub fn new(
        api_key: Option<SecretString>,
        config: &ExtractorConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.provider_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point at a different API root (for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl MetadataProvider for YouTubeDataApi {
    async fn video(&self, id: &VideoId) -> ProviderResult<Option<VideoMetadata>> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::MissingApiKey)?;
        let endpoint = format!("{}/videos", self.base_url);

        debug!(video_id = %id, "Fetching video metadata");
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("part", VIDEO_PARTS),
                ("id", id.as_str()),
                ("key", api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&endpoint, e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&endpoint, e.without_url()))?;

        if !status.is_success() {
            let message = api_error_message(&body).unwrap_or_else(|| status.to_string());
            warn!(video_id = %id, status = %status, message = %message, "YouTube API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_video_list(&body)
    }

    fn name(&self) -> &str {
        "youtube-data-api"
    }
}

#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    content_details: ContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    description: String,
    published_at: String,
    #[serde(default)]
    tags: Vec<String>,
    category_id: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    like_count: Option<String>,
    view_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Parse a `videos.list` body; an empty `items` array means "no such video".
pub(crate) fn parse_video_list(body: &str) -> ProviderResult<Option<VideoMetadata>> {
    let response: VideoListResponse = serde_json::from_str(body)?;

    Ok(response.items.into_iter().next().map(|item| VideoMetadata {
        title: item.snippet.title,
        creator: item.snippet.channel_title,
        description: item.snippet.description,
        published_at: item.snippet.published_at,
        tags: item.snippet.tags,
        category_id: item.snippet.category_id,
        likes: item.statistics.like_count,
        views: item.statistics.view_count,
        comments: item.statistics.comment_count,
        duration: item.content_details.duration,
    }))
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}
