//! Transcript provider that reads YouTube's own caption tracks.
//!
//! Three round trips, each bounded by the provider timeout:
//! 1. the watch page, for the innertube API key
//! 2. the innertube player endpoint, for playability and caption tracks
//! 3. the chosen track's timed-text XML

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{FetchError, TranscriptError, TranscriptResult};
use crate::traits::transcript::TranscriptProvider;
use crate::types::config::ExtractorConfig;
use crate::types::video::{TranscriptSegment, VideoId};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";

/// Client identity for the player endpoint; the web client no longer gets
/// caption URLs without a proof-of-origin token.
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("innertube key pattern is valid")
});

static TEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("text").expect("text selector is valid"));

/// Fetches transcripts straight from youtube.com.
pub struct YouTubeCaptions {
    client: reqwest::Client,
    languages: Vec<String>,
}

impl YouTubeCaptions {
    pub fn new(config: &ExtractorConfig) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US"),
        );
        // Skips the EU consent interstitial.
        headers.insert(
            reqwest::header::COOKIE,
            reqwest::header::HeaderValue::from_static("CONSENT=YES+cb"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.provider_timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            languages: config.transcript_languages.clone(),
        })
    }

    async fn get_text(&self, url: &str, request: reqwest::RequestBuilder) -> TranscriptResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RateLimited {
                video_id: String::new(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()).into());
        }

        Ok(response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?)
    }

    async fn fetch_api_key(&self, id: &VideoId) -> TranscriptResult<String> {
        let html = self
            .get_text(
                WATCH_URL,
                self.client.get(WATCH_URL).query(&[("v", id.as_str())]),
            )
            .await?;
        extract_innertube_key(&html, id)
    }

    async fn fetch_player(&self, id: &VideoId, api_key: &str) -> TranscriptResult<PlayerResponse> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": id.as_str(),
        });

        let text = self
            .get_text(
                PLAYER_URL,
                self.client
                    .post(PLAYER_URL)
                    .query(&[("key", api_key)])
                    .json(&body),
            )
            .await?;

        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_segments(&self, id: &VideoId) -> TranscriptResult<Vec<TranscriptSegment>> {
        let api_key = self.fetch_api_key(id).await?;
        let player = self.fetch_player(id, &api_key).await?;
        let track = select_track(player, &self.languages, id)?;

        debug!(
            video_id = %id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Fetching caption track"
        );

        let url = track.base_url.replace("&fmt=srv3", "");
        let xml = self.get_text(&url, self.client.get(&url)).await?;
        parse_timedtext(&xml)
    }
}

#[async_trait]
impl TranscriptProvider for YouTubeCaptions {
    async fn transcript(&self, id: &VideoId) -> TranscriptResult<Vec<TranscriptSegment>> {
        self.fetch_segments(id).await.map_err(|e| {
            let e = match e {
                TranscriptError::RateLimited { .. } => TranscriptError::RateLimited {
                    video_id: id.to_string(),
                },
                other => other,
            };
            warn!(video_id = %id, error = %e, "Transcript unavailable");
            e
        })
    }

    fn name(&self) -> &str {
        "youtube-captions"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

pub(crate) fn extract_innertube_key(html: &str, id: &VideoId) -> TranscriptResult<String> {
    if let Some(key) = INNERTUBE_API_KEY.captures(html).and_then(|c| c.get(1)) {
        return Ok(key.as_str().to_string());
    }
    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::RateLimited {
            video_id: id.to_string(),
        });
    }
    Err(TranscriptError::Parse(
        "INNERTUBE_API_KEY not found in watch page".to_string(),
    ))
}

/// Pick a track: languages in preference order, manual before generated.
pub(crate) fn select_track(
    player: PlayerResponse,
    languages: &[String],
    id: &VideoId,
) -> TranscriptResult<CaptionTrack> {
    if let Some(playability) = &player.playability_status {
        if playability.status != "OK" {
            let reason = playability.reason.clone().unwrap_or_default();
            if playability.status == "LOGIN_REQUIRED" && reason.contains("not a bot") {
                return Err(TranscriptError::RateLimited {
                    video_id: id.to_string(),
                });
            }
            return Err(TranscriptError::VideoUnavailable {
                video_id: id.to_string(),
                reason: if reason.is_empty() {
                    playability.status.clone()
                } else {
                    reason
                },
            });
        }
    }

    let tracks = player
        .captions
        .and_then(|c| c.renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(TranscriptError::Disabled {
            video_id: id.to_string(),
        });
    }

    for language in languages {
        let matching = || tracks.iter().filter(|t| &t.language_code == language);
        if let Some(track) = matching()
            .find(|t| !t.is_generated())
            .or_else(|| matching().next())
        {
            return Ok(track.clone());
        }
    }

    Err(TranscriptError::NotFound {
        video_id: id.to_string(),
        languages: languages.to_vec(),
    })
}

/// Parse timed-text XML into segments, dropping captions with no text.
///
/// Caption text is entity-encoded twice (once for XML, once for the HTML it
/// was authored as), so it goes through the HTML parser a second time, which
/// also drops inline `<b>`/`<i>` formatting.
///
/// A body with no `<text>` elements at all (empty, or an HTML interstitial
/// served in place of the track) is an error, not an empty transcript.
pub(crate) fn parse_timedtext(xml: &str) -> TranscriptResult<Vec<TranscriptSegment>> {
    let document = Html::parse_document(xml);

    let mut elements = document.select(&TEXT_SELECTOR).peekable();
    if elements.peek().is_none() {
        return Err(TranscriptError::Parse(
            "no caption segments in timed-text response".to_string(),
        ));
    }

    Ok(elements
        .filter_map(|el| {
            let start = el.value().attr("start")?.parse::<f64>().ok()?;
            let duration = el
                .value()
                .attr("dur")
                .and_then(|d| d.parse::<f64>().ok())
                .unwrap_or(0.0);

            let raw: String = el.text().collect();
            let text: String = Html::parse_fragment(&raw).root_element().text().collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment::new(start, text).with_duration(duration))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn player(json: &str) -> PlayerResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_innertube_key() {
        let html = r#"<script>ytcfg.set({"INNERTUBE_API_KEY": "AIzaSyA-test_KEY", "X": 1})</script>"#;
        assert_eq!(extract_innertube_key(html, &id()).unwrap(), "AIzaSyA-test_KEY");

        let captcha = r#"<div class="g-recaptcha" data-sitekey="x"></div>"#;
        assert!(matches!(
            extract_innertube_key(captcha, &id()),
            Err(TranscriptError::RateLimited { .. })
        ));

        assert!(matches!(
            extract_innertube_key("<html></html>", &id()),
            Err(TranscriptError::Parse(_))
        ));
    }

    #[test]
    fn test_select_track_prefers_manual() {
        let response = player(
            r#"{
                "playabilityStatus": {"status": "OK"},
                "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
                    {"baseUrl": "https://x/asr-en", "languageCode": "en", "kind": "asr"},
                    {"baseUrl": "https://x/de", "languageCode": "de"},
                    {"baseUrl": "https://x/en", "languageCode": "en"}
                ]}}
            }"#,
        );
        let track = select_track(response, &langs(&["en"]), &id()).unwrap();
        assert_eq!(track.base_url, "https://x/en");
    }

    #[test]
    fn test_select_track_falls_back_to_generated_then_next_language() {
        let json = r#"{
            "playabilityStatus": {"status": "OK"},
            "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
                {"baseUrl": "https://x/asr-en", "languageCode": "en", "kind": "asr"},
                {"baseUrl": "https://x/fr", "languageCode": "fr"}
            ]}}
        }"#;

        let track = select_track(player(json), &langs(&["en"]), &id()).unwrap();
        assert!(track.is_generated());

        let track = select_track(player(json), &langs(&["es", "fr"]), &id()).unwrap();
        assert_eq!(track.language_code, "fr");

        let err = select_track(player(json), &langs(&["ja"]), &id()).unwrap_err();
        assert!(matches!(err, TranscriptError::NotFound { .. }));
    }

    #[test]
    fn test_select_track_no_captions_is_disabled() {
        let response = player(r#"{"playabilityStatus": {"status": "OK"}}"#);
        assert!(matches!(
            select_track(response, &langs(&["en"]), &id()),
            Err(TranscriptError::Disabled { .. })
        ));
    }

    #[test]
    fn test_select_track_unplayable() {
        let response = player(
            r#"{"playabilityStatus": {"status": "ERROR", "reason": "This video is private"}}"#,
        );
        match select_track(response, &langs(&["en"]), &id()) {
            Err(TranscriptError::VideoUnavailable { reason, .. }) => {
                assert_eq!(reason, "This video is private")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let bot_check = player(
            r#"{"playabilityStatus": {"status": "LOGIN_REQUIRED", "reason": "Sign in to confirm you're not a bot"}}"#,
        );
        assert!(matches!(
            select_track(bot_check, &langs(&["en"]), &id()),
            Err(TranscriptError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_parse_timedtext() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
            <text start="0.24" dur="2.1">we&amp;#39;re no strangers</text>
            <text start="2.34" dur="1.5">to &lt;i&gt;love&lt;/i&gt;</text>
            <text start="4.0" dur="0.5"></text>
            <text start="5.1">you know the rules</text>
        </transcript>"#;

        let segments = parse_timedtext(xml).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "we're no strangers");
        assert_eq!(segments[0].start, 0.24);
        assert_eq!(segments[0].duration, 2.1);
        assert_eq!(segments[1].text, "to love");
        assert_eq!(segments[2].start, 5.1);
        assert_eq!(segments[2].duration, 0.0);
    }

    #[test]
    fn test_parse_timedtext_without_segments_is_error() {
        assert!(matches!(parse_timedtext(""), Err(TranscriptError::Parse(_))));

        let consent = r#"<!DOCTYPE html><html><head><title>Before you continue to YouTube</title></head>
            <body><form action="https://consent.youtube.com/save"><button>Accept all</button></form></body></html>"#;
        assert!(matches!(parse_timedtext(consent), Err(TranscriptError::Parse(_))));
    }
}
