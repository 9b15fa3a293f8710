//! Slug generation and normalization.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert a title or wikilink text to a comparable slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace and underscores with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// The result is a fixed point: `slugify(&slugify(s)) == slugify(s)`.
///
/// # Examples
///
/// ```
/// use linkloom_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("  doc   title "), slugify("Doc Title"));
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' || c == '-' {
                Some("-")
            } else if is_extending(c) {
                // An orphaned mark would attach to the hyphen on a second pass
                None
            } else if c.is_ascii_alphanumeric() || c.is_alphabetic() {
                // Keep unicode letters along with their combining marks
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = hyphen_runs().replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

/// Whether `c` continues the cluster of whatever precedes it
fn is_extending(c: char) -> bool {
    let mut pair = String::with_capacity(8);
    pair.push('a');
    pair.push(c);
    pair.graphemes(true).count() == 1
}
