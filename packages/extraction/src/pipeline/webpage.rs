//! Webpage extraction: visible headings and paragraphs as plain text.

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

use crate::error::Result;
use crate::pipeline::count_tokens;
use crate::traits::fetcher::DocumentFetcher;
use crate::types::response::{token_summary, Extraction};

/// Elements whose text makes up the extracted content, in document order.
static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, p, yt-formatted-string").expect("valid selector")
});

/// Subtrees that never contribute text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub struct WebpageExtractor {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl WebpageExtractor {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and reduce it to its meaningful text.
    pub async fn extract(&self, url: &str) -> Result<Extraction> {
        info!(url = %url, fetcher = self.fetcher.name(), "Extracting webpage");

        let document = self.fetcher.fetch(url).await?;
        let text = extract_meaningful_text(&document.body);
        let token_count = count_tokens(&text);

        debug!(
            url = %url,
            bytes = document.content_length(),
            tokens = token_count,
            "Webpage text extracted"
        );

        Ok(Extraction::new(
            url,
            webpage_content(&text, token_count),
            token_count,
        ))
    }
}

/// Content block for a webpage: the text followed by its summary line.
///
/// A page with no meaningful text still yields a non-empty block.
pub fn webpage_content(text: &str, token_count: usize) -> String {
    let summary = token_summary(token_count);
    if text.is_empty() {
        summary
    } else {
        format!("{}\n\n{}", text, summary)
    }
}

/// Text of every heading, paragraph and `yt-formatted-string` element, one
/// per line with whitespace collapsed. Script and style contents are dropped
/// and elements without visible text are skipped.
pub fn extract_meaningful_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&CONTENT_SELECTOR)
        .filter_map(|element| {
            let mut raw = String::new();
            collect_visible_text(element, &mut raw);
            let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            (!line.is_empty()).then_some(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_visible_text(child, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{MockFailure, MockFetcher};
    use crate::error::ErrorKind;

    #[test]
    fn test_script_is_not_content() {
        let html = "<html><script>evil()</script><p>Hello world</p></html>";
        assert_eq!(extract_meaningful_text(html), "Hello world");
    }

    #[test]
    fn test_selected_elements_in_order() {
        let html = r#"
            <html><head><title>Ignored</title><style>p { color: red }</style></head>
            <body>
              <h1>Heading</h1>
              <div>Loose div text</div>
              <p>First   paragraph
                 spans lines</p>
              <h2>Sub</h2>
              <p>   </p>
              <yt-formatted-string>Comment text</yt-formatted-string>
              <h4>Too deep</h4>
              <h3>Third</h3>
            </body></html>
        "#;

        assert_eq!(
            extract_meaningful_text(html),
            "Heading\nFirst paragraph spans lines\nSub\nComment text\nThird"
        );
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let html = "<p>A <b>bold</b> move<script>x()</script> here</p>";
        assert_eq!(extract_meaningful_text(html), "A bold move here");
    }

    #[test]
    fn test_empty_page_content() {
        assert_eq!(extract_meaningful_text("<html><body></body></html>"), "");
        assert_eq!(webpage_content("", 0), "Token count: 0");
        assert_eq!(
            webpage_content("Hello world", 2),
            "Hello world\n\nToken count: 2"
        );
    }

    #[tokio::test]
    async fn test_extract_from_fetcher() {
        let fetcher = MockFetcher::new().with_html(
            "https://example.com",
            "<html><script>evil()</script><p>Hello world</p></html>",
        );
        let extractor = WebpageExtractor::new(Arc::new(fetcher.clone()));

        let extraction = extractor.extract("https://example.com").await.unwrap();
        assert_eq!(extraction.url, "https://example.com");
        assert_eq!(extraction.content, "Hello world\n\nToken count: 2");
        assert_eq!(extraction.summary, "Token count: 2");
        assert_eq!(fetcher.fetch_call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let fetcher =
            MockFetcher::new().with_failure("https://slow.example", MockFailure::Timeout);
        let extractor = WebpageExtractor::new(Arc::new(fetcher));

        let err = extractor.extract("https://slow.example").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }
}
