//! Pattern-matching signal extraction over raw HTML.
//!
//! This deliberately does NOT build a DOM. The scoring weights were tuned
//! against these exact loose patterns, so the known misclassifications
//! (`alt=""` counted as "has alt", `viewport` matched anywhere in the
//! document) must stay as they are. Everything funnels through
//! [`SignalExtractor::extract`], so a DOM-based implementation can be
//! swapped in later without touching the scorer or narrator.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::PageSignals;

pub struct SignalExtractor;

impl SignalExtractor {
    /// Extract all SEO signals from a raw HTML payload.
    ///
    /// Total over all inputs: unmatched fields default to empty/zero/false.
    pub fn extract(html: &str) -> PageSignals {
        let (total_images, images_without_alt) = Self::count_images(html);

        PageSignals {
            title: Self::extract_title(html),
            meta_description: Self::extract_meta_description(html),
            h1_count: Self::count_h1(html),
            h2_count: Self::count_h2(html),
            total_images,
            images_without_alt,
            has_viewport: html.contains("viewport"),
            has_canonical: html.contains(r#"rel="canonical""#),
        }
    }

    /// First `<title>` element's text content, trimmed. Empty titles count
    /// as absent so the scorer sees them as missing.
    pub fn extract_title(html: &str) -> Option<String> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern =
            PATTERN.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
        pattern
            .captures(html)
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// First `<meta name="description" content="...">` value, trimmed.
    /// The tag name matches case-insensitively; the attribute text does not.
    pub fn extract_meta_description(html: &str) -> Option<String> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r#"(?s)(?i:<meta)[^>]*name="description"[^>]*content="([^"]*)""#).unwrap()
        });
        pattern
            .captures(html)
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Number of `<h1>…</h1>` elements (case-insensitive, content spanning
    /// newlines).
    pub fn count_h1(html: &str) -> i64 {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"(?is)<h1[^>]*>.*?</h1>").unwrap());
        pattern.find_iter(html).count() as i64
    }

    /// Number of `<h2` opening tags (case-insensitive). Content not required.
    pub fn count_h2(html: &str) -> i64 {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"(?i)<h2").unwrap());
        pattern.find_iter(html).count() as i64
    }

    /// Count `<img …>` tags, and how many of them lack the literal substring
    /// `alt=` in their raw text.
    pub fn count_images(html: &str) -> (i64, i64) {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"(?i)<img[^>]*>").unwrap());

        let mut total = 0;
        let mut without_alt = 0;
        for tag in pattern.find_iter(html) {
            total += 1;
            if !tag.as_str().contains("alt=") {
                without_alt += 1;
            }
        }
        (total, without_alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = "<html><head><TITLE> Hello World </TITLE></head></html>";
        assert_eq!(SignalExtractor::extract_title(html).as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_empty_title_counts_as_absent() {
        assert_eq!(SignalExtractor::extract_title("<title>   </title>"), None);
        assert_eq!(SignalExtractor::extract_title("<p>no title here</p>"), None);
    }

    #[test]
    fn test_title_spans_newlines() {
        let html = "<title>\n  Multi\n  line\n</title>";
        assert_eq!(
            SignalExtractor::extract_title(html).as_deref(),
            Some("Multi\n  line")
        );
    }

    #[test]
    fn test_extract_meta_description() {
        let html = r#"<META name="description" content=" A fine page. ">"#;
        assert_eq!(
            SignalExtractor::extract_meta_description(html).as_deref(),
            Some("A fine page.")
        );
    }

    #[test]
    fn test_meta_description_attribute_case_sensitive() {
        // Tag name may vary in case, the attribute text may not.
        let html = r#"<meta NAME="description" content="nope">"#;
        assert_eq!(SignalExtractor::extract_meta_description(html), None);
    }

    #[test]
    fn test_heading_counts() {
        let html = r#"
            <H1>First</H1>
            <h1 class="big">Second</h1>
            <h2>Sub</h2>
            <H2 id="x">Other sub</H2>
        "#;
        assert_eq!(SignalExtractor::count_h1(html), 2);
        assert_eq!(SignalExtractor::count_h2(html), 2);
    }

    #[test]
    fn test_unclosed_h1_is_not_counted() {
        assert_eq!(SignalExtractor::count_h1("<h1>dangling"), 0);
    }

    #[test]
    fn test_image_alt_counting_is_crude() {
        let html = r#"
            <img src="a.png" alt="described">
            <img src="b.png" alt="">
            <img src="c.png">
            <IMG src="d.png"/>
        "#;
        let (total, without_alt) = SignalExtractor::count_images(html);
        assert_eq!(total, 4);
        // alt="" still contains the literal `alt=`, so only c and d count.
        assert_eq!(without_alt, 2);
    }

    #[test]
    fn test_viewport_matches_anywhere() {
        // Loose on purpose: any occurrence of the substring counts.
        let meta = r#"<meta name="viewport" content="width=device-width">"#;
        assert!(SignalExtractor::extract(meta).has_viewport);
        assert!(SignalExtractor::extract("<p>about the viewport</p>").has_viewport);
        assert!(!SignalExtractor::extract("<p>nothing</p>").has_viewport);
    }

    #[test]
    fn test_canonical_is_literal_substring() {
        assert!(SignalExtractor::extract(r#"<link rel="canonical" href="/x">"#).has_canonical);
        assert!(!SignalExtractor::extract(r#"<link rel='canonical' href="/x">"#).has_canonical);
    }

    #[test]
    fn test_extraction_is_total_on_garbage() {
        let signals = SignalExtractor::extract("<<<>>>\u{0000}\u{FFFD} not html at all");
        assert_eq!(signals.title, None);
        assert_eq!(signals.meta_description, None);
        assert_eq!(signals.h1_count, 0);
        assert_eq!(signals.h2_count, 0);
        assert_eq!(signals.total_images, 0);
        assert_eq!(signals.images_without_alt, 0);
        assert!(!signals.has_viewport);
        assert!(!signals.has_canonical);
    }

    #[test]
    fn test_images_without_alt_never_exceeds_total() {
        for html in [
            "",
            "<img>",
            "<img alt=\"x\"><img><img alt=>",
            "<img><img><img>",
        ] {
            let (total, without_alt) = SignalExtractor::count_images(html);
            assert!(without_alt <= total, "failed for {html:?}");
        }
    }
}
