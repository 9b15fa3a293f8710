//! Turning site-relative output paths into rooted or absolute URLs.

use crate::config::normalize_base_url;

/// Whether `url` already points somewhere on its own
fn is_absolute_url(url: &str) -> bool {
    url.contains("://")
        || url.starts_with("//")
        || url.starts_with('#')
        || ["mailto:", "tel:", "data:"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
}

/// Qualify an output path against a base URL
///
/// ```
/// use linkloom_core::qualify_url;
///
/// assert_eq!(qualify_url("/target/index.html", "/"), "/target/index.html");
/// assert_eq!(qualify_url("notes/a.html", "/blog"), "/blog/notes/a.html");
/// ```
pub fn qualify_url(path: &str, base_url: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!(
        "{}{}",
        normalize_base_url(base_url),
        path.trim_start_matches('/')
    )
}
