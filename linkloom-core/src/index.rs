//! Slug → URL index over a whole document collection.

use crate::{slug::slugify, url::qualify_url};
use linkloom_types::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only lookup from title slug to published URL
///
/// Entries are kept sorted by slug so serialized indexes are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForwardIndex {
    entries: BTreeMap<String, String>,
}

impl ForwardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slug, returning the URL it replaced
    pub fn insert(&mut self, slug: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.entries.insert(slug.into(), url.into())
    }

    /// Look up an already-normalized slug
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.entries.get(slug).map(String::as_str)
    }

    /// Look up raw link text
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.get(&slugify(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ForwardIndex {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut index = ForwardIndex::new();
        for (slug, url) in iter {
            index.insert(slug, url);
        }
        index
    }
}

/// Reduce a document collection to a slug-to-url index
///
/// When two titles share a slug the later document wins.
pub fn build_index<'a, I>(documents: I, base_url: &str) -> ForwardIndex
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut index = ForwardIndex::new();
    for doc in documents {
        let slug = slugify(&doc.title);
        let url = qualify_url(&doc.output_path, base_url);
        if let Some(previous) = index.insert(slug.clone(), url) {
            tracing::debug!(
                "Slug '{}' from {} replaces earlier target {}",
                slug,
                doc.id_path,
                previous
            );
        }
    }
    index
}
