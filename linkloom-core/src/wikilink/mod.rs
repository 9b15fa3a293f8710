//! Wikilink handling for `[[Page Title]]` syntax.
//!
//! Scanning and rendering both go through [`pattern`], so the two passes can
//! never disagree on what counts as a wikilink.

pub mod pattern;
pub mod render;
pub mod scan;

pub use pattern::{find_wikilinks, replace_wikilinks, WikilinkMatch};
pub use render::{render, WikilinkRenderer};
pub use scan::{scan, uplift_wikilinks};
