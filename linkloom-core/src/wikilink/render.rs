//! Rewriting `[[wikilinks]]` in document content into HTML links.

use super::pattern::replace_wikilinks;
use crate::{index::ForwardIndex, template::LinkTemplates};
use linkloom_types::Document;
use rayon::prelude::*;

/// Renders wikilinks against a prebuilt index
pub struct WikilinkRenderer<'a> {
    index: &'a ForwardIndex,
    templates: &'a LinkTemplates,
}

impl<'a> WikilinkRenderer<'a> {
    pub fn new(index: &'a ForwardIndex, templates: &'a LinkTemplates) -> Self {
        Self { index, templates }
    }

    /// Replace every wikilink in `content`
    ///
    /// Links whose slug is in the index become the link template; the rest
    /// become the nolink template.
    pub fn render_content(&self, content: &str) -> String {
        replace_wikilinks(content, |m| {
            let text = m.text();
            match self.index.get(&m.slug()) {
                Some(url) => self.templates.link(url, text),
                None => self.templates.nolink(text),
            }
        })
    }

    /// Render a single document, leaving every field but `content` as is
    pub fn render(&self, doc: Document) -> Document {
        let content = self.render_content(&doc.content);
        doc.with_content(content)
    }

    /// Render documents in parallel, keeping their order
    pub fn render_all(&self, documents: Vec<Document>) -> Vec<Document> {
        documents
            .into_par_iter()
            .map(|doc| self.render(doc))
            .collect()
    }
}

/// Render wikilinks in a document's content
pub fn render(doc: Document, index: &ForwardIndex, templates: &LinkTemplates) -> Document {
    WikilinkRenderer::new(index, templates).render(doc)
}
