//! Collecting the outgoing wikilink slugs of a document.

use super::pattern::find_wikilinks;
use linkloom_types::Document;
use std::collections::BTreeSet;

/// Unique slugs referenced by wikilinks in `content`
pub fn scan(content: &str) -> BTreeSet<String> {
    find_wikilinks(content).map(|m| m.slug()).collect()
}

/// Attach the scanned slugs to a document under `wikilinks`
pub fn uplift_wikilinks(doc: Document) -> Document {
    let wikilinks = scan(&doc.content);
    doc.with_wikilinks(wikilinks)
}
