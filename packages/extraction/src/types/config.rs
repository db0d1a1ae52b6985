//! Configuration for the extractors and their providers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser-like agent; YouTube serves consent walls to obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration shared by the fetcher and the YouTube providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Upper bound for a webpage fetch, in seconds.
    ///
    /// Default: 10.
    pub fetch_timeout_secs: u64,

    /// Upper bound for each metadata or transcript call, in seconds.
    ///
    /// Default: 10.
    pub provider_timeout_secs: u64,

    /// User-Agent sent with every outbound request.
    pub user_agent: String,

    /// Caption languages in order of preference.
    ///
    /// Default: `["en"]`.
    pub transcript_languages: Vec<String>,

    /// Render transcripts as `{start, text}` pairs instead of plain text.
    ///
    /// Default: false.
    pub include_start_times: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            provider_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transcript_languages: vec!["en".to_string()],
            include_start_times: false,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch_timeout(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_provider_timeout(mut self, secs: u64) -> Self {
        self.provider_timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the caption language preference. Empty lists are ignored.
    pub fn with_transcript_languages(mut self, languages: Vec<String>) -> Self {
        if !languages.is_empty() {
            self.transcript_languages = languages;
        }
        self
    }

    pub fn with_start_times(mut self, include: bool) -> Self {
        self.include_start_times = include;
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
