//! URL classification.
//!
//! Decides, without touching the network, whether a URL is worth extracting
//! at all and which extractor should handle it.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::types::video::VideoId;

/// Watch and share-link shapes, anchored at the start of the string.
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("YouTube URL pattern is valid")
});

/// What kind of resource a well-formed URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    YouTube(VideoId),
    Webpage,
}

impl LinkKind {
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::YouTube(_) => "youtube",
            LinkKind::Webpage => "webpage",
        }
    }
}

/// True iff the URL has a scheme and a non-empty authority.
pub fn is_well_formed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

/// Extract the video id from a YouTube watch or youtu.be URL.
///
/// Returns `None` for anything else; that is a classification, not an error.
pub fn extract_video_identifier(url: &str) -> Option<VideoId> {
    YOUTUBE_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
}

/// Classify a URL into exactly one extraction path.
pub fn classify(url: &str) -> LinkKind {
    match extract_video_identifier(url) {
        Some(id) => LinkKind::YouTube(id),
        None => LinkKind::Webpage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_well_formed_requires_scheme_and_host() {
        assert!(is_well_formed("https://example.com"));
        assert!(is_well_formed("http://example.com/path?q=1"));
        assert!(is_well_formed("ftp://files.example.com/readme.txt"));

        assert!(!is_well_formed("example.com"));
        assert!(!is_well_formed("www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_well_formed("mailto:someone@example.com"));
        assert!(!is_well_formed("http://"));
        assert!(!is_well_formed("file:///etc/passwd"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("not a url"));
    }

    #[test]
    fn test_extract_video_identifier_shapes() {
        let expected = Some("dQw4w9WgXcQ");
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ?si=abc",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
        ] {
            assert_eq!(
                extract_video_identifier(url).as_ref().map(VideoId::as_str),
                expected,
                "{url}"
            );
        }
    }

    #[test]
    fn test_non_youtube_urls_are_webpages() {
        for url in [
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/channel/UC38IQsAvIsxxjztdMZQtwHA",
            "https://www.youtube.com/watch?v=short",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://example.com/?u=https://youtu.be/dQw4w9WgXcQ",
        ] {
            assert_eq!(classify(url), LinkKind::Webpage, "{url}");
        }
    }

    #[test]
    fn test_overlong_id_captures_first_eleven() {
        let id = extract_video_identifier("https://youtu.be/dQw4w9WgXcQEXTRA").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    proptest! {
        #[test]
        fn prop_watch_urls_yield_exact_id(id in "[A-Za-z0-9_-]{11}", host in "(www\\.|m\\.)?") {
            let url = format!("https://{}youtube.com/watch?v={}", host, id);
            let extracted = extract_video_identifier(&url).unwrap();
            prop_assert_eq!(extracted.as_str().len(), 11);
            prop_assert_eq!(extracted.as_str(), id.as_str());
        }

        #[test]
        fn prop_extraction_is_idempotent(id in "[A-Za-z0-9_-]{11}") {
            let first = extract_video_identifier(&format!("https://youtu.be/{}", id)).unwrap();
            let again = extract_video_identifier(&first.watch_url()).unwrap();
            prop_assert_eq!(first, again);
        }

        #[test]
        fn prop_schemeless_strings_are_malformed(s in "[a-z0-9./?=_-]{0,40}") {
            prop_assume!(!s.contains(':'));
            prop_assert!(!is_well_formed(&s));
        }
    }
}
