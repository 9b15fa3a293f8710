//! Configuration parsing and management.

use crate::template::{LinkTemplates, TemplateError, DEFAULT_LINK_TEMPLATE, DEFAULT_NOLINK_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid link template: {0}")]
    Template(#[from] TemplateError),

    #[error("Base URL '{0}' has a scheme but no host")]
    MissingHost(String),
}

/// Settings for the wikilink stage
///
/// ```yaml
/// base_url: /blog/
/// link_template: '<a href="{url}">{text}</a>'
/// nolink_template: '<span class="nolink">{text}</span>'
/// enable_backlinks: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikilinkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Template for resolved links, takes `{url}` and `{text}`
    #[serde(default = "default_link_template")]
    pub link_template: String,

    /// Template for unresolved links, takes `{text}` only
    #[serde(default = "default_nolink_template")]
    pub nolink_template: String,

    #[serde(default = "default_true")]
    pub enable_backlinks: bool,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_link_template() -> String {
    DEFAULT_LINK_TEMPLATE.to_string()
}

fn default_nolink_template() -> String {
    DEFAULT_NOLINK_TEMPLATE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WikilinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            link_template: default_link_template(),
            nolink_template: default_nolink_template(),
            enable_backlinks: true,
        }
    }
}

impl WikilinkConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text, validating the templates and base URL
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: WikilinkConfig = serde_yaml::from_str(yaml)?;
        config.templates()?;
        config.validate_base_url()?;
        Ok(config)
    }

    /// Reject base URLs like `https://` that name a scheme and nothing else
    pub fn validate_base_url(&self) -> Result<(), ConfigError> {
        match self.base_url.trim().split_once("://") {
            Some((_, rest)) if rest.trim_matches('/').is_empty() => {
                Err(ConfigError::MissingHost(self.base_url.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Normalized base URL with a trailing slash ("/foo/", "/" or "https://host/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    /// Compile the configured link templates
    pub fn templates(&self) -> Result<LinkTemplates, TemplateError> {
        LinkTemplates::new(&self.link_template, &self.nolink_template)
    }
}

/// Ensure base URLs have a leading and trailing slash
///
/// Base URLs carrying a scheme keep their scheme and host and only gain the
/// trailing slash. A scheme with no host is returned as is; see
/// [`WikilinkConfig::validate_base_url`].
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    if let Some((scheme, rest)) = trimmed.split_once("://") {
        let host_and_path = rest.trim_end_matches('/');
        if host_and_path.is_empty() {
            return trimmed.to_string();
        }
        return format!("{}://{}/", scheme, host_and_path);
    }

    let mut s = trimmed.to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}
