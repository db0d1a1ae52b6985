use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use link_extraction::{ExtractorConfig, SecretString};
use std::env;
use std::time::Duration;

/// Slack on top of the slowest chain of upstream calls.
const DEADLINE_MARGIN_SECS: u64 = 5;

/// Sequential provider calls on the YouTube path: metadata, watch page,
/// player, timed-text.
const YOUTUBE_PROVIDER_CALLS: u64 = 4;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_keys: Vec<SecretString>,
    pub youtube_api_key: Option<SecretString>,
    pub fetch_timeout_secs: u64,
    pub provider_timeout_secs: u64,
    pub transcript_languages: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_keys: Vec<SecretString> = split_list(
            &lookup("API_KEYS").context("API_KEYS must be set")?,
        )
        .into_iter()
        .map(SecretString::from)
        .collect();
        if api_keys.is_empty() {
            bail!("API_KEYS must contain at least one key");
        }

        let transcript_languages = lookup("TRANSCRIPT_LANGUAGES")
            .map(|raw| split_list(&raw))
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(|| vec!["en".to_string()]);

        Ok(Self {
            port: parse_or(&lookup, "PORT", 5001).context("PORT must be a valid number")?,
            api_keys,
            youtube_api_key: lookup("YOUTUBE_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            fetch_timeout_secs: parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10)
                .context("FETCH_TIMEOUT_SECS must be a number of seconds")?,
            provider_timeout_secs: parse_or(&lookup, "PROVIDER_TIMEOUT_SECS", 10)
                .context("PROVIDER_TIMEOUT_SECS must be a number of seconds")?,
            transcript_languages,
            rate_limit_per_second: parse_or(&lookup, "RATE_LIMIT_PER_SECOND", 10)
                .context("RATE_LIMIT_PER_SECOND must be a positive number")?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 20)
                .context("RATE_LIMIT_BURST must be a positive number")?,
        })
    }

    /// Bound on a whole request: the slower of the two extraction paths,
    /// each call at its own timeout, plus a margin.
    pub fn request_deadline(&self) -> Duration {
        let webpage = self.fetch_timeout_secs;
        let youtube = self.provider_timeout_secs.saturating_mul(YOUTUBE_PROVIDER_CALLS);
        Duration::from_secs(webpage.max(youtube).saturating_add(DEADLINE_MARGIN_SECS))
    }

    /// Settings handed to the extraction library.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_fetch_timeout(self.fetch_timeout_secs)
            .with_provider_timeout(self.provider_timeout_secs)
            .with_transcript_languages(self.transcript_languages.clone())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => Ok(raw.trim().parse()?),
        None => Ok(default),
    }
}
