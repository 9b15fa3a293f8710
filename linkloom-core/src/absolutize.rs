//! Prefix root-relative `href`/`src` URLs in content with the site base URL.

use crate::{config::normalize_base_url, url::qualify_url};
use linkloom_types::Document;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static URL_ATTR: OnceLock<Regex> = OnceLock::new();

fn url_attr_regex() -> &'static Regex {
    URL_ATTR.get_or_init(|| Regex::new(r#"(src|href)=["'](.*?)["']"#).unwrap())
}

/// Rewrite `href="/..."` and `src="/..."` so they start with `base_url`
///
/// Relative, protocol-relative and absolute URLs are left alone.
pub fn absolutize_content(content: &str, base_url: &str) -> String {
    let base = normalize_base_url(base_url);
    if base == "/" {
        return content.to_string();
    }

    url_attr_regex()
        .replace_all(content, |caps: &Captures<'_>| {
            let attr = &caps[1];
            let value = &caps[2];
            if value.starts_with('/') && !value.starts_with("//") {
                format!(r#"{}="{}""#, attr, qualify_url(value, &base))
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Absolutize URLs in a document's content
pub fn absolutize(doc: Document, base_url: &str) -> Document {
    if normalize_base_url(base_url) == "/" {
        return doc;
    }
    let content = absolutize_content(&doc.content, base_url);
    doc.with_content(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_base_is_noop() {
        let doc = Document::new("A", r#"<a href="/b.html">b</a>"#, "a.html");
        assert_eq!(absolutize(doc.clone(), "/"), doc);
        assert_eq!(absolutize(doc.clone(), ""), doc);
    }

    #[test]
    fn test_rewrites_rooted_urls() {
        let content = r#"<a href="/b/index.html">b</a><img src='/img/x.png'>"#;
        assert_eq!(
            absolutize_content(content, "/blog"),
            r#"<a href="/blog/b/index.html">b</a><img src="/blog/img/x.png">"#
        );
    }

    #[test]
    fn test_leaves_other_urls() {
        let content = concat!(
            r#"<a href="https://x.org/">x</a>"#,
            r#"<a href="rel.html">r</a>"#,
            r#"<script src="//cdn.x.org/a.js"></script>"#,
            r##"<a href="#top">t</a>"##,
        );
        assert_eq!(absolutize_content(content, "https://example.com/site"), content);
    }

    #[test]
    fn test_absolute_base() {
        let doc = Document::new("A", r#"<a href="/b.html">b</a>"#, "a.html");
        let out = absolutize(doc, "https://example.com");
        assert_eq!(out.content, r#"<a href="https://example.com/b.html">b</a>"#);
    }
}
