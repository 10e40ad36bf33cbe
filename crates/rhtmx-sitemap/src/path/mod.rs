//! URL path utilities for validation, normalization and joining
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use rhtmx_sitemap::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/project/[id]"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about")); // Missing leading /
/// assert!(!is_valid_path("/about/")); // Trailing /
/// assert!(!is_valid_path("/about//page")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
///
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Missing leading slash: `path` → `/path`
///
/// # Examples
///
/// ```
/// use rhtmx_sitemap::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("blog//[slug]/"), "/blog/[slug]");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Joins concrete segments into a URL path
///
/// A segment may itself contain `/` (a catch-all value such as `b/c`); each
/// of its components becomes its own path component. Empty components are
/// dropped, so no components at all yields the root `/`.
///
/// ```
/// use rhtmx_sitemap::path::join_segments;
///
/// assert_eq!(join_segments(&["docs", "b/c"]), "/docs/b/c");
/// assert_eq!(join_segments::<&str>(&[]), "/");
/// ```
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let components: Vec<&str> = segments
        .iter()
        .flat_map(|seg| seg.as_ref().split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    format!("/{}", components.join("/"))
}

/// Prefixes a path with the site URL
///
/// An empty or `/` base leaves the path relative.
///
/// ```
/// use rhtmx_sitemap::path::absolute_url;
///
/// assert_eq!(absolute_url("https://my-site.com/", "/foo"), "https://my-site.com/foo");
/// assert_eq!(absolute_url("https://my-site.com", "/"), "https://my-site.com/");
/// assert_eq!(absolute_url("/", "/foo"), "/foo");
/// ```
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = normalize_path(path);

    if base.is_empty() {
        return path.into_owned();
    }

    format!("{}{}", base, path)
}
