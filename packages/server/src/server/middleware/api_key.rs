use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use link_extraction::SecretString;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::server::error::ApiError;

/// Header carrying the caller's shared secret (`API-Key` on the wire).
pub const API_KEY_HEADER: &str = "api-key";

/// The set of accepted API keys. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ApiKeyPolicy {
    keys: Vec<SecretString>,
}

impl ApiKeyPolicy {
    pub fn new(keys: Vec<SecretString>) -> Self {
        let keys = keys.into_iter().filter(|k| !k.is_empty()).collect();
        Self { keys }
    }

    /// True iff `candidate` matches one of the configured keys.
    pub fn allows(&self, candidate: &str) -> bool {
        // Check every key so timing does not depend on which one matched.
        self.keys
            .iter()
            .fold(false, |found, key| key.matches(candidate) | found)
    }

    pub fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|key| self.allows(key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Reject requests without a valid `API-Key` header.
pub async fn require_api_key(
    State(policy): State<Arc<ApiKeyPolicy>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !policy.is_authorized(request.headers()) {
        warn!(path = %request.uri().path(), "Rejected request without valid API key");
        return Err(ApiError::Forbidden);
    }

    debug!(path = %request.uri().path(), "API key accepted");
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ApiKeyPolicy {
        ApiKeyPolicy::new(vec!["xxx".into(), "yyy".into(), "".into()])
    }

    fn headers(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key.parse().unwrap());
        headers
    }

    #[test]
    fn test_empty_keys_are_dropped() {
        assert_eq!(policy().len(), 2);
        assert!(!policy().allows(""));
    }

    #[test]
    fn test_any_configured_key_is_accepted() {
        let policy = policy();
        assert!(policy.is_authorized(&headers("xxx")));
        assert!(policy.is_authorized(&headers("yyy")));
        assert!(!policy.is_authorized(&headers("zzz")));
        assert!(!policy.is_authorized(&HeaderMap::new()));
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let name = axum::http::HeaderName::from_bytes(b"API-Key").unwrap();
        headers.insert(name, "xxx".parse().unwrap());
        assert!(policy().is_authorized(&headers));
    }
}
