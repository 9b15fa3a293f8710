//! Shared types for linkloom
//!
//! This crate provides the document record that flows through the wikilink
//! stage, together with its list-item projection used in backlink entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document '{id}' is missing required field: {field}")]
    MissingField { id: String, field: &'static str },
}

/// A content document
///
/// Stages never mutate a document in place; they consume it and hand back a
/// new value with a single field replaced (see [`Document::with_content`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    /// Source path, used to identify the document in logs and errors
    pub id_path: String,

    /// Display title, also the key wikilinks resolve against
    pub title: String,

    /// Body text (usually HTML by the time wikilinks are rendered)
    pub content: String,

    /// Published file path relative to the site root
    pub output_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Slugs of the wikilinks found in `content`. Empty until scanned.
    pub wikilinks: BTreeSet<String>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        let output_path = output_path.into();
        Self {
            id_path: output_path.clone(),
            title: title.into(),
            content: content.into(),
            output_path,
            summary: None,
            date: None,
            wikilinks: BTreeSet::new(),
        }
    }

    /// Replace the content, keeping every other field
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Replace the outgoing wikilink slugs, keeping every other field
    pub fn with_wikilinks(self, wikilinks: BTreeSet<String>) -> Self {
        Self { wikilinks, ..self }
    }

    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..self
        }
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    /// Output path with a trailing `index.html` dropped
    pub fn simple_path(&self) -> String {
        simple_path(&self.output_path)
    }

    /// Reduce the document to its summary form
    pub fn to_list_item(&self) -> ListItem {
        ListItem {
            title: self.title.clone(),
            output_path: self.output_path.clone(),
            simple_path: self.simple_path(),
            summary: self.summary.clone(),
            date: self.date,
        }
    }
}

/// Loosely-typed document record as handed over by upstream stages
///
/// Every field is optional here; converting into a [`Document`] checks the
/// required ones and fails on the first one missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub id_path: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub output_path: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub wikilinks: Option<BTreeSet<String>>,
}

impl TryFrom<RawDocument> for Document {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let output_path = raw.output_path.filter(|p| !p.trim().is_empty());
        let id = raw
            .id_path
            .clone()
            .or_else(|| output_path.clone())
            .unwrap_or_else(|| "<unknown>".to_string());

        let Some(output_path) = output_path else {
            return Err(DocumentError::MissingField {
                id,
                field: "output_path",
            });
        };
        let Some(title) = raw.title else {
            return Err(DocumentError::MissingField { id, field: "title" });
        };

        Ok(Document {
            id_path: id,
            title,
            content: raw.content.unwrap_or_default(),
            output_path,
            summary: raw.summary,
            date: raw.date,
            wikilinks: raw.wikilinks.unwrap_or_default(),
        })
    }
}

/// Summary form of a document (title + paths)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    pub output_path: String,
    pub simple_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Drop a trailing `index.html` path component
///
/// ```
/// use linkloom_types::simple_path;
///
/// assert_eq!(simple_path("notes/rust/index.html"), "notes/rust/");
/// assert_eq!(simple_path("notes/rust.html"), "notes/rust.html");
/// ```
pub fn simple_path(output_path: &str) -> String {
    match output_path.strip_suffix("index.html") {
        Some(parent) if parent.is_empty() || parent.ends_with('/') => parent.to_string(),
        _ => output_path.to_string(),
    }
}
