//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use link_extraction::{
    HttpFetcher, LinkReader, TranscriptFormat, YouTubeCaptions, YouTubeDataApi,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::middleware::{
    enforce_deadline, require_api_key, ApiKeyPolicy, RateLimit, API_KEY_HEADER,
};
use crate::server::routes::{
    capabilities_handler, health_handler, info_handler, read_link_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<LinkReader>,
}

impl AppState {
    pub fn new(reader: LinkReader) -> Self {
        Self {
            reader: Arc::new(reader),
        }
    }
}

/// Build the production application: real providers, API-key gate and
/// per-IP rate limiting.
pub fn build_app(config: &Config) -> Result<Router> {
    let extractor_config = config.extractor_config();

    let fetcher = HttpFetcher::new(&extractor_config).context("Failed to create HTTP client")?;

    if config.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY not set; YouTube links will report an extraction error");
    }
    let metadata = YouTubeDataApi::new(config.youtube_api_key.clone(), &extractor_config)
        .context("Failed to create YouTube Data API client")?;

    let transcripts =
        YouTubeCaptions::new(&extractor_config).context("Failed to create captions client")?;

    let reader = LinkReader::new(Arc::new(fetcher), Arc::new(metadata), Arc::new(transcripts))
        .with_transcript_format(TranscriptFormat::from_include_start_times(
            extractor_config.include_start_times,
        ));

    let policy = ApiKeyPolicy::new(config.api_keys.clone());
    tracing::info!(keys = policy.len(), "API key policy loaded");

    build_router(
        AppState::new(reader),
        policy,
        Some(RateLimit::from_config(config)),
        config.request_deadline(),
    )
}

/// Build the Axum application router
///
/// Rate limiting keys on the peer IP from `ConnectInfo`; pass `None` when
/// driving the router without a socket. Requests still running after
/// `deadline` get the JSON 408 envelope.
pub fn build_router(
    state: AppState,
    policy: ApiKeyPolicy,
    rate_limit: Option<RateLimit>,
    deadline: Duration,
) -> Result<Router> {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]);

    let router = Router::new()
        .route("/read_link", post(read_link_handler))
        .route("/health", get(health_handler))
        .route("/capabilities", get(capabilities_handler))
        .route("/info", get(info_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn_with_state(
            Arc::new(policy),
            require_api_key,
        ))
        .with_state(state);

    let router = match rate_limit {
        Some(limit) => limit.apply(router)?,
        None => router,
    };

    Ok(router
        .layer(middleware::from_fn_with_state(deadline, enforce_deadline))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
