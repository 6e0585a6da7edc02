//! HTML extraction of links, script sources, and form actions
//!
//! Given a fetched page body and the URL it was served from, this module
//! produces the page's discovery batch: anchors eligible for follow-up,
//! script sources, and form actions, all resolved to absolute URLs.
//! Deduplication is not this module's job; a batch may repeat URLs and the
//! registry filters them at claim time.

use scraper::{Html, Selector};
use url::Url;

/// Everything one page contributed to the crawl
#[derive(Debug, Clone, Default)]
pub struct DiscoveryBatch {
    /// Anchor targets with an `http`/`https` scheme, in document order
    pub links: Vec<String>,

    /// Script sources, any scheme, in document order
    pub scripts: Vec<String>,

    /// Form actions, any scheme, in document order
    pub forms: Vec<String>,
}

impl DiscoveryBatch {
    /// URLs this batch feeds into the follow set: script sources first, then
    /// anchors, each restricted to crawlable schemes. First-claim output
    /// ordering inherits this script-first order.
    pub fn follow_candidates(&self) -> impl Iterator<Item = &str> {
        self.scripts
            .iter()
            .filter(|u| has_crawlable_scheme(u))
            .chain(self.links.iter())
            .map(String::as_str)
    }

    /// True when the batch holds nothing at all
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.scripts.is_empty() && self.forms.is_empty()
    }
}

/// Parses a page body and extracts its discovery batch
///
/// Every `a[href]`, `script[src]`, and `form[action]` attribute is resolved
/// against `base_url`. Anchors are kept only when the resolved scheme is
/// `http` or `https`; scripts and forms are kept regardless of scheme for
/// reporting. Missing attributes are skipped silently. Malformed markup
/// yields a best-effort partial batch, never an error.
///
/// # Arguments
///
/// * `base_url` - The URL the body was served from (post-redirect)
/// * `body` - The page markup
pub fn extract_page(base_url: &Url, body: &str) -> DiscoveryBatch {
    let document = Html::parse_document(body);
    let mut batch = DiscoveryBatch::default();

    if let Ok(selector) = Selector::parse("script[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                if let Some(resolved) = resolve_attribute(src, base_url) {
                    batch.scripts.push(resolved);
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_attribute(href, base_url) {
                    if has_crawlable_scheme(&resolved) {
                        batch.links.push(resolved);
                    }
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("form[action]") {
        for element in document.select(&selector) {
            if let Some(action) = element.value().attr("action") {
                if let Some(resolved) = resolve_attribute(action, base_url) {
                    batch.forms.push(resolved);
                }
            }
        }
    }

    batch
}

/// Resolves one attribute value to an absolute URL string
///
/// Returns None for empty attributes and values that do not resolve.
fn resolve_attribute(value: &str, base_url: &Url) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    base_url.join(value).ok().map(|u| u.to_string())
}

/// True when the URL's scheme is eligible for follow-up crawling
fn has_crawlable_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(batch.links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(batch.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(batch.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_mailto_link() {
        let html = r#"<html><body><a href="mailto:test@example.com">Email</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert!(batch.links.is_empty());
    }

    #[test]
    fn test_skip_javascript_link() {
        let html = r#"<html><body><a href="javascript:void(0)">Link</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert!(batch.links.is_empty());
    }

    #[test]
    fn test_missing_href_skipped() {
        let html = r#"<html><body><a name="anchor">No href</a></body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_extract_script_sources() {
        let html = r#"<html><head>
            <script src="/app.js"></script>
            <script>inline()</script>
            <script src="https://cdn.example.com/lib.js"></script>
        </head></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(
            batch.scripts,
            vec![
                "https://example.com/app.js",
                "https://cdn.example.com/lib.js"
            ]
        );
    }

    #[test]
    fn test_extract_form_actions() {
        let html = r#"<html><body>
            <form action="/login" method="post"></form>
            <form method="get"></form>
            <form action="mailto:admin@example.com"></form>
        </body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(
            batch.forms,
            vec![
                "https://example.com/login",
                "mailto:admin@example.com"
            ]
        );
    }

    #[test]
    fn test_follow_candidates_order_scripts_first() {
        let html = r#"<html>
            <head><script src="/app.js"></script></head>
            <body><a href="/page1">One</a></body>
        </html>"#;
        let batch = extract_page(&base_url(), html);
        let candidates: Vec<_> = batch.follow_candidates().collect();
        assert_eq!(
            candidates,
            vec!["https://example.com/app.js", "https://example.com/page1"]
        );
    }

    #[test]
    fn test_follow_candidates_exclude_non_http_scripts() {
        let html = r#"<html><head>
            <script src="data:text/javascript,void(0)"></script>
            <script src="/app.js"></script>
        </head></html>"#;
        let batch = extract_page(&base_url(), html);
        let candidates: Vec<_> = batch.follow_candidates().collect();
        assert_eq!(candidates, vec!["https://example.com/app.js"]);
        // The non-http source is still reported
        assert_eq!(batch.scripts.len(), 2);
    }

    #[test]
    fn test_duplicates_within_page_are_kept() {
        let html = r#"<html><body>
            <a href="/page">One</a>
            <a href="/page">Two</a>
        </body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(batch.links.len(), 2);
    }

    #[test]
    fn test_malformed_markup_best_effort() {
        let html = r#"<html><body><a href="/ok">Link</a><div><a href="/also-ok""#;
        let batch = extract_page(&base_url(), html);
        assert!(batch.links.contains(&"https://example.com/ok".to_string()));
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"<html><body>
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/c">C</a>
        </body></html>"#;
        let batch = extract_page(&base_url(), html);
        assert_eq!(
            batch.links,
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/c"
            ]
        );
    }
}
