//! The `[[...]]` matcher shared by the scanner and the renderer.

use crate::slug::slugify;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

static WIKILINK_REGEX: OnceLock<Regex> = OnceLock::new();

fn wikilink_regex() -> &'static Regex {
    WIKILINK_REGEX.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap())
}

/// One `[[...]]` occurrence in a piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikilinkMatch<'a> {
    /// Byte range of the whole `[[...]]` token
    pub range: Range<usize>,
    /// Raw text between the brackets
    pub inner: &'a str,
}

impl<'a> WikilinkMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        Some(Self {
            range: whole.range(),
            inner: inner.as_str(),
        })
    }

    /// Display text: the inner text with surrounding whitespace removed
    pub fn text(&self) -> &'a str {
        self.inner.trim()
    }

    /// Slug the link resolves against
    pub fn slug(&self) -> String {
        slugify(self.text())
    }
}

/// Iterate over every wikilink in `content`, left to right
pub fn find_wikilinks(content: &str) -> impl Iterator<Item = WikilinkMatch<'_>> {
    wikilink_regex()
        .captures_iter(content)
        .filter_map(|caps| WikilinkMatch::from_captures(&caps))
}

/// Replace every wikilink in `content` with the output of `replacement`
///
/// Text outside of matches, including malformed brackets, is copied through
/// unchanged.
pub fn replace_wikilinks<F>(content: &str, mut replacement: F) -> String
where
    F: FnMut(&WikilinkMatch<'_>) -> String,
{
    wikilink_regex()
        .replace_all(content, |caps: &Captures<'_>| {
            match WikilinkMatch::from_captures(caps) {
                Some(m) => replacement(&m),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(content: &str) -> Vec<&str> {
        find_wikilinks(content).map(|m| m.text()).collect()
    }

    #[test]
    fn test_finds_links_in_order() {
        assert_eq!(
            texts("See [[One]], then [[ Two ]] and [[Three]]."),
            vec!["One", "Two", "Three"]
        );
    }

    #[test]
    fn test_match_range_and_inner() {
        let content = "ab [[ Page ]] cd";
        let m = find_wikilinks(content).next().unwrap();

        assert_eq!(&content[m.range.clone()], "[[ Page ]]");
        assert_eq!(m.inner, " Page ");
        assert_eq!(m.text(), "Page");
        assert_eq!(m.slug(), "page");
    }

    #[test]
    fn test_malformed_brackets_do_not_match() {
        assert!(texts("[[unterminated").is_empty());
        assert!(texts("[single]").is_empty());
        assert!(texts("[[]]").is_empty());
        assert!(texts("[[a]b]]").is_empty());
    }

    #[test]
    fn test_opening_brackets_inside_link() {
        // The first `[[` opens the link; inner `[` is allowed
        assert_eq!(texts("[[a [[b]]"), vec!["a [[b"]);
    }

    #[test]
    fn test_replace_keeps_surrounding_text() {
        let out = replace_wikilinks("x [[A]] y [[B]] [[z", |m| m.text().to_lowercase());
        assert_eq!(out, "x a y b [[z");
    }

    #[test]
    fn test_replace_without_links_is_identity() {
        let content = "<p>No links here [just] text</p>";
        assert_eq!(replace_wikilinks(content, |_| unreachable!()), content);
    }
}
