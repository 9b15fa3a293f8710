//! Reverse reference graph: which documents link to a given page.

use crate::slug::slugify;
use linkloom_types::{Document, ListItem};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Map from target `output_path` to the documents referencing it
///
/// Entries for a target keep document iteration order. A target nobody links
/// to has no key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BacklinkGraph {
    entries: BTreeMap<String, Vec<ListItem>>,
}

impl BacklinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a referencing document to a target's entry
    pub fn add(&mut self, target_path: &str, source: ListItem) {
        self.entries
            .entry(target_path.to_string())
            .or_default()
            .push(source);
    }

    /// Backlinks for a target path, if any exist
    pub fn get(&self, target_path: &str) -> Option<&[ListItem]> {
        self.entries.get(target_path).map(Vec::as_slice)
    }

    pub fn contains(&self, target_path: &str) -> bool {
        self.entries.contains_key(target_path)
    }

    /// Backlinks for a target path, empty when there are none
    pub fn backlinks(&self, target_path: &str) -> Vec<ListItem> {
        self.entries.get(target_path).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ListItem])> {
        self.entries
            .iter()
            .map(|(path, items)| (path.as_str(), items.as_slice()))
    }

    /// Append `other`'s entries after this graph's, key by key
    pub fn merge(&mut self, other: BacklinkGraph) {
        for (path, mut items) in other.entries {
            self.entries.entry(path).or_default().append(&mut items);
        }
    }

    /// Serialize as a JSON object keyed by target path
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Title slug → document, over the whole collection (later titles win)
fn title_map(documents: &[Document]) -> HashMap<String, &Document> {
    documents
        .iter()
        .map(|doc| (slugify(&doc.title), doc))
        .collect()
}

fn add_document(graph: &mut BacklinkGraph, doc: &Document, targets: &HashMap<String, &Document>) {
    if doc.wikilinks.is_empty() {
        return;
    }

    let item = doc.to_list_item();
    for slug in &doc.wikilinks {
        match targets.get(slug) {
            Some(target) => graph.add(&target.output_path, item.clone()),
            None => tracing::debug!("{}: no document for wikilink '{}'", doc.id_path, slug),
        }
    }
}

/// Build the backlink graph from scanned documents
///
/// Documents must already carry their `wikilinks` (see
/// [`uplift_wikilinks`](crate::wikilink::uplift_wikilinks)). Unresolvable
/// slugs are skipped. A document linking to itself gets a self entry.
pub fn build_backlinks(documents: &[Document]) -> BacklinkGraph {
    let targets = title_map(documents);
    let mut graph = BacklinkGraph::new();
    for doc in documents {
        add_document(&mut graph, doc, &targets);
    }
    graph
}

/// Parallel variant of [`build_backlinks`] with the same result
///
/// Each worker folds a contiguous run of documents into a partial graph;
/// partials are merged left to right so per-target order is unchanged.
pub fn build_backlinks_parallel(documents: &[Document]) -> BacklinkGraph {
    let targets = title_map(documents);
    documents
        .par_iter()
        .fold(BacklinkGraph::new, |mut graph, doc| {
            add_document(&mut graph, doc, &targets);
            graph
        })
        .reduce(BacklinkGraph::new, |mut left, right| {
            left.merge(right);
            left
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikilink::uplift_wikilinks;

    fn scanned(title: &str, content: &str, output_path: &str) -> Document {
        uplift_wikilinks(Document::new(title, content, output_path))
    }

    fn titles(items: &[ListItem]) -> Vec<&str> {
        items.iter().map(|li| li.title.as_str()).collect()
    }

    #[test]
    fn test_backlink_symmetry() {
        let docs = vec![
            scanned("A", "links to [[B]]", "a/index.html"),
            scanned("B", "no links", "b/index.html"),
            scanned("C", "no links", "c/index.html"),
        ];

        let graph = build_backlinks(&docs);

        let entries = graph.get("b/index.html").unwrap();
        assert_eq!(titles(entries), vec!["A"]);
        assert_eq!(entries[0].output_path, "a/index.html");
        assert_eq!(entries[0].simple_path, "a/");
        assert!(!graph.contains("c/index.html"));
        assert!(graph.get("c/index.html").is_none());
        assert!(graph.backlinks("c/index.html").is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_entries_follow_document_order() {
        let docs = vec![
            scanned("Zeta", "[[Hub]]", "zeta.html"),
            scanned("Alpha", "[[hub]] twice [[HUB]]", "alpha.html"),
            scanned("Hub", "", "hub.html"),
            scanned("Mid", "[[Hub]] and [[Alpha]]", "mid.html"),
        ];

        let graph = build_backlinks(&docs);

        assert_eq!(titles(graph.get("hub.html").unwrap()), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(titles(graph.get("alpha.html").unwrap()), vec!["Mid"]);
    }

    #[test]
    fn test_unresolved_is_skipped() {
        let docs = vec![scanned("A", "[[Nowhere]]", "a.html")];
        assert!(build_backlinks(&docs).is_empty());
    }

    #[test]
    fn test_unscanned_documents_contribute_nothing() {
        let docs = vec![
            Document::new("A", "[[B]]", "a.html"),
            Document::new("B", "", "b.html"),
        ];
        assert!(build_backlinks(&docs).is_empty());
    }

    #[test]
    fn test_unscanned_target_still_resolves() {
        let docs = vec![
            scanned("A", "[[B]]", "a.html"),
            Document::new("B", "", "b.html"),
        ];
        assert_eq!(titles(build_backlinks(&docs).get("b.html").unwrap()), vec!["A"]);
    }

    #[test]
    fn test_self_reference_creates_self_entry() {
        let docs = vec![scanned("Loop", "I am [[Loop]]", "loop.html")];
        let graph = build_backlinks(&docs);

        assert_eq!(titles(graph.get("loop.html").unwrap()), vec!["Loop"]);
    }

    #[test]
    fn test_duplicate_titles_resolve_to_later_document() {
        let docs = vec![
            scanned("Dup", "", "first.html"),
            scanned("dup", "", "second.html"),
            scanned("Linker", "[[DUP]]", "linker.html"),
        ];
        let graph = build_backlinks(&docs);

        assert!(graph.get("first.html").is_none());
        assert_eq!(titles(graph.get("second.html").unwrap()), vec!["Linker"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_backlinks(&[]).is_empty());
        assert!(build_backlinks_parallel(&[]).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut docs: Vec<Document> = (0..200)
            .map(|i| {
                let body = format!("[[Hub]] [[Page {}]] [[Page {}]]", (i + 1) % 200, i % 7);
                scanned(&format!("Page {i}"), &body, &format!("p{i}/index.html"))
            })
            .collect();
        docs.push(scanned("Hub", "[[Page 3]]", "hub/index.html"));

        let sequential = build_backlinks(&docs);
        let parallel = build_backlinks_parallel(&docs);

        assert_eq!(parallel, sequential);
        assert_eq!(sequential.get("hub/index.html").unwrap().len(), 200);
    }

    #[test]
    fn test_merge_appends_per_key() {
        let a = Document::new("A", "", "a.html").to_list_item();
        let b = Document::new("B", "", "b.html").to_list_item();

        let mut left = BacklinkGraph::new();
        left.add("t.html", a.clone());
        let mut right = BacklinkGraph::new();
        right.add("t.html", b.clone());
        right.add("u.html", b.clone());

        left.merge(right);

        assert_eq!(left.backlinks("t.html"), vec![a, b.clone()]);
        assert_eq!(left.backlinks("u.html"), vec![b]);
    }

    #[test]
    fn test_to_json() {
        let docs = vec![
            scanned("A", "[[B]]", "a/index.html"),
            scanned("B", "", "b/index.html"),
        ];
        let json = build_backlinks(&docs).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["b/index.html"][0]["title"], "A");
        assert_eq!(value["b/index.html"][0]["simple_path"], "a/");
    }
}
