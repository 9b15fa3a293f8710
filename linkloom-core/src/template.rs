//! Link snippet templates with `{url}` and `{text}` placeholders.

use thiserror::Error;

pub const DEFAULT_LINK_TEMPLATE: &str = r#"<a href="{url}" class="wikilink">{text}</a>"#;
pub const DEFAULT_NOLINK_TEMPLATE: &str =
    r#"<span title="Page doesn't exist yet" class="nolink">{text}</span>"#;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{name}}} in template '{template}'")]
    UnknownPlaceholder { name: String, template: String },

    #[error("unclosed '{{' in template '{0}'")]
    Unclosed(String),

    #[error("single '}}' in template '{0}'")]
    UnmatchedClose(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Url,
    Text,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "url" => Some(Placeholder::Url),
            "text" => Some(Placeholder::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A pre-parsed snippet template
///
/// `{{` and `}}` produce literal braces. A brace that is neither doubled nor
/// part of a placeholder is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LinkTemplate {
    fn parse(source: &str, allowed: &[Placeholder]) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(source.to_string()));
                    }

                    let placeholder = Placeholder::from_name(name.trim())
                        .filter(|p| allowed.contains(p))
                        .ok_or_else(|| TemplateError::UnknownPlaceholder {
                            name: name.clone(),
                            template: source.to_string(),
                        })?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(placeholder));
                }
                '}' => return Err(TemplateError::UnmatchedClose(source.to_string())),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Template accepting both `{url}` and `{text}`
    pub fn link(source: &str) -> Result<Self, TemplateError> {
        Self::parse(source, &[Placeholder::Url, Placeholder::Text])
    }

    /// Template accepting `{text}` only
    pub fn nolink(source: &str) -> Result<Self, TemplateError> {
        Self::parse(source, &[Placeholder::Text])
    }

    /// Substitute placeholders in a single pass
    ///
    /// Values are inserted verbatim, so a `{text}` inside a URL is never
    /// expanded a second time.
    pub fn fill(&self, url: &str, text: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + url.len() + text.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Slot(Placeholder::Url) => out.push_str(url),
                Segment::Slot(Placeholder::Text) => out.push_str(text),
            }
        }
        out
    }
}

/// The resolved/unresolved template pair used by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    link: LinkTemplate,
    nolink: LinkTemplate,
}

impl LinkTemplates {
    pub fn new(link: &str, nolink: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            link: LinkTemplate::link(link)?,
            nolink: LinkTemplate::nolink(nolink)?,
        })
    }

    pub fn link(&self, url: &str, text: &str) -> String {
        self.link.fill(url, text)
    }

    pub fn nolink(&self, text: &str) -> String {
        self.nolink.fill("", text)
    }
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_TEMPLATE, DEFAULT_NOLINK_TEMPLATE)
            .expect("built-in link templates are valid")
    }
}
