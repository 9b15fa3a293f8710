//! # linkloom-core
//!
//! Wikilink resolution and backlink indexing for static site pipelines.
//!
//! Documents are scanned for `[[Page Title]]` references, the collection is
//! reduced into a title-slug → URL index, each document's links are rendered
//! against that index, and a reverse graph of backlinks is built for
//! templates to consume.

pub mod absolutize;
pub mod backlinks;
pub mod config;
pub mod index;
pub mod pipeline;
pub mod slug;
pub mod template;
pub mod url;
pub mod wikilink;

pub use absolutize::absolutize;
pub use backlinks::{build_backlinks, build_backlinks_parallel, BacklinkGraph};
pub use config::{ConfigError, WikilinkConfig};
pub use index::{build_index, ForwardIndex};
pub use pipeline::{PipelineError, StageOutput, WikilinkStage};
pub use slug::slugify;
pub use template::{LinkTemplate, LinkTemplates, TemplateError};
pub use url::qualify_url;
pub use wikilink::{render, scan, uplift_wikilinks, WikilinkRenderer};

pub use linkloom_types::{Document, DocumentError, ListItem, RawDocument};
