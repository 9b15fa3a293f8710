//! The wikilink stage: scan → index → render → backlinks.
//!
//! Phase one scans every document and reduces the collection into the
//! forward index. Phase two renders each document against that index and
//! builds the backlink graph. Nothing in phase two starts before the index
//! is complete.

use crate::{
    backlinks::{build_backlinks, BacklinkGraph},
    config::{ConfigError, WikilinkConfig},
    index::{build_index, ForwardIndex},
    template::{LinkTemplates, TemplateError},
    wikilink::{uplift_wikilinks, WikilinkRenderer},
};
use linkloom_types::{Document, DocumentError, RawDocument};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Errors that abort the whole stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An upstream record is missing a required field
    #[error("Invalid document: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid link template: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Everything the stage produces for one build
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageOutput {
    /// Documents with `wikilinks` attached and links rendered, in input order
    pub documents: Vec<Document>,
    pub index: ForwardIndex,
    pub backlinks: BacklinkGraph,
}

/// Wikilink resolution stage for a document collection
#[derive(Debug, Clone)]
pub struct WikilinkStage {
    base_url: String,
    templates: LinkTemplates,
    enable_backlinks: bool,
}

impl WikilinkStage {
    pub fn new(config: &WikilinkConfig) -> Result<Self, PipelineError> {
        let templates = config.templates()?;
        config.validate_base_url()?;

        Ok(Self {
            base_url: config.normalized_base_url(),
            templates,
            enable_backlinks: config.enable_backlinks,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run the stage over typed documents
    pub fn run(&self, documents: Vec<Document>) -> StageOutput {
        tracing::info!("Scanning {} documents for wikilinks", documents.len());

        let scanned: Vec<Document> = documents.into_par_iter().map(uplift_wikilinks).collect();
        let link_count: usize = scanned.iter().map(|d| d.wikilinks.len()).sum();

        let index = build_index(&scanned, &self.base_url);
        tracing::info!(
            "Indexed {} titles, {} outgoing wikilinks",
            index.len(),
            link_count
        );

        let renderer = WikilinkRenderer::new(&index, &self.templates);
        let documents = renderer.render_all(scanned);

        let backlinks = if self.enable_backlinks {
            build_backlinks(&documents)
        } else {
            tracing::info!("Backlinks disabled; skipping backlink graph");
            BacklinkGraph::new()
        };
        tracing::debug!("Backlinks recorded for {} targets", backlinks.len());

        StageOutput {
            documents,
            index,
            backlinks,
        }
    }

    /// Run the stage over loosely-typed records
    ///
    /// A record missing a required field stops the stage before any
    /// scanning happens.
    pub fn run_raw(&self, records: Vec<RawDocument>) -> Result<StageOutput, PipelineError> {
        let documents = records
            .into_iter()
            .map(Document::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::error!("Rejecting document collection: {}", e))?;
        Ok(self.run(documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> WikilinkStage {
        WikilinkStage::new(&WikilinkConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let output = stage().run(Vec::new());

        assert!(output.documents.is_empty());
        assert!(output.index.is_empty());
        assert!(output.backlinks.is_empty());
    }

    #[test]
    fn test_full_run() {
        let docs = vec![
            Document::new("Home", "Start at [[Guide]] or [[Missing]]", "index.html"),
            Document::new("Guide", "Back [[home]]", "guide/index.html"),
        ];

        let output = stage().run(docs);

        assert_eq!(output.index.get("guide"), Some("/guide/index.html"));
        assert_eq!(
            output.documents[0].content,
            concat!(
                r#"Start at <a href="/guide/index.html" class="wikilink">Guide</a> or "#,
                r#"<span title="Page doesn't exist yet" class="nolink">Missing</span>"#
            )
        );
        assert_eq!(
            output.documents[1].content,
            r#"Back <a href="/index.html" class="wikilink">home</a>"#
        );
        assert_eq!(output.backlinks.get("guide/index.html").unwrap()[0].title, "Home");
        assert_eq!(output.backlinks.get("index.html").unwrap()[0].title, "Guide");
    }

    #[test]
    fn test_backlinks_disabled() {
        let config = WikilinkConfig {
            enable_backlinks: false,
            ..WikilinkConfig::default()
        };
        let stage = WikilinkStage::new(&config).unwrap();
        let docs = vec![
            Document::new("A", "[[B]]", "a.html"),
            Document::new("B", "", "b.html"),
        ];

        let output = stage.run(docs);

        assert!(output.backlinks.is_empty());
        assert!(output.documents[0].content.contains("/b.html"));
    }

    #[test]
    fn test_invalid_template_config() {
        let config = WikilinkConfig {
            link_template: "{href}".into(),
            ..WikilinkConfig::default()
        };
        assert!(matches!(
            WikilinkStage::new(&config),
            Err(PipelineError::Template(_))
        ));
    }

    #[test]
    fn test_base_url_without_host() {
        let config = WikilinkConfig {
            base_url: "https://".into(),
            ..WikilinkConfig::default()
        };
        let err = WikilinkStage::new(&config).unwrap_err();

        assert!(matches!(err, PipelineError::Config(ConfigError::MissingHost(_))));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Base URL 'https://' has a scheme but no host"
        );
    }

    #[test]
    fn test_run_raw_fails_fast() {
        let records = vec![
            RawDocument {
                title: Some("A".into()),
                output_path: Some("a.html".into()),
                ..RawDocument::default()
            },
            RawDocument {
                id_path: Some("b.md".into()),
                title: Some("B".into()),
                ..RawDocument::default()
            },
        ];

        let err = stage().run_raw(records).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid document: Document 'b.md' is missing required field: output_path"
        );
    }
}
