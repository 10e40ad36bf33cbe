//! Route template discovery
//!
//! Walks a pages directory and turns every page file into the route template
//! it serves: `pages/blog/[slug].rs` → `/blog/[slug]`.
//!
//! # Skipped files
//!
//! - files whose extension is not a page extension
//! - relative paths matching an ignore glob (`api/**` by default)
//! - `_`-prefixed files (`_layout`, `_error`, `_document`, ...)
//! - `loading` and `not-found`
//! - anything under a parallel slot (`@slot`) or an intercepting marker
//!   (`(.)`, `(..)`, `(...)`, `(....)`)
//!
//! Route groups `(folder)` are kept but removed from the URL.

use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SitemapError};
use crate::path::join_segments;

pub const DEFAULT_EXTENSIONS: &[&str] = &["rs", "rsx", "rhtml", "rhtmx", "js", "jsx", "mjs", "ts", "tsx"];

pub const DEFAULT_IGNORE: &[&str] = &["api/**"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub pages_dir: PathBuf,
    pub extensions: Vec<String>,
    pub ignore: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::new("pages")
    }
}

impl DiscoveryOptions {
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ignore.into_iter().map(Into::into).collect();
        self
    }
}

/// Discovers route templates under `options.pages_dir`
///
/// Returns the templates sorted and deduplicated. A directory without any
/// page is an error, as is a missing directory.
pub fn discover_routes(options: &DiscoveryOptions) -> Result<Vec<String>> {
    let ignore = compile_patterns(&options.ignore)?;
    let mut routes = BTreeSet::new();

    for entry in WalkDir::new(&options.pages_dir) {
        let entry = entry.map_err(|source| SitemapError::Discovery {
            path: options.pages_dir.clone(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(&options.pages_dir) {
            Ok(relative) => relative,
            Err(_) => continue,
        };

        if ignore.iter().any(|pattern| pattern.matches_path(relative)) {
            continue;
        }

        if let Some(route) = route_from_relative_path(relative, &options.extensions) {
            routes.insert(route);
        }
    }

    if routes.is_empty() {
        return Err(SitemapError::NoRoutes {
            path: options.pages_dir.clone(),
        });
    }

    debug!("Discovered {} routes in {:?}", routes.len(), options.pages_dir);
    Ok(routes.into_iter().collect())
}

/// Maps a path relative to the pages directory to its route template
///
/// Pure function: `None` when the file is not a routable page.
///
/// ```
/// use rhtmx_sitemap::discovery::route_from_relative_path;
/// use std::path::Path;
///
/// let extensions = vec!["rs".to_string()];
/// assert_eq!(
///     route_from_relative_path(Path::new("(shop)/products/[id].rs"), &extensions),
///     Some("/products/[id]".to_string())
/// );
/// assert_eq!(route_from_relative_path(Path::new("_layout.rs"), &extensions), None);
/// ```
pub fn route_from_relative_path(relative: &Path, extensions: &[String]) -> Option<String> {
    let extension = relative.extension()?.to_str()?;
    if !extensions.iter().any(|allowed| allowed == extension) {
        return None;
    }

    let without_ext = relative.with_extension("");
    let components = without_ext
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    if is_special_file(components.last()?) {
        return None;
    }

    let mut segments = Vec::with_capacity(components.len());
    for component in components {
        if is_intercept_marker(component) || component.starts_with('@') {
            return None;
        }
        if is_route_group(component) {
            continue;
        }
        segments.push(component);
    }

    if matches!(segments.last(), Some(&"index") | Some(&"page")) {
        segments.pop();
    }

    Some(join_segments(&segments))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| SitemapError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn is_special_file(name: &str) -> bool {
    name.starts_with('_') || name == "loading" || name == "not-found"
}

/// `(.)`, `(..)`, `(...)`, `(....)`, alone or prefixing a folder name
fn is_intercept_marker(segment: &str) -> bool {
    segment.starts_with("(.")
}

fn is_route_group(segment: &str) -> bool {
    segment.starts_with('(') && segment.ends_with(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> Option<String> {
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect();
        route_from_relative_path(Path::new(path), &extensions)
    }

    #[test]
    fn test_index_maps_to_parent() {
        assert_eq!(route("index.rs"), Some("/".to_string()));
        assert_eq!(route("blog/index.tsx"), Some("/blog".to_string()));
        assert_eq!(route("blog/page.rs"), Some("/blog".to_string()));
    }

    #[test]
    fn test_dynamic_segments_are_kept() {
        assert_eq!(route("users/[id].rs"), Some("/users/[id]".to_string()));
        assert_eq!(route("docs/[...slug].js"), Some("/docs/[...slug]".to_string()));
        assert_eq!(route("[page]/[foo]/index.ts"), Some("/[page]/[foo]".to_string()));
    }

    #[test]
    fn test_special_files_are_skipped() {
        assert_eq!(route("_layout.rs"), None);
        assert_eq!(route("_layout.admin.rs"), None);
        assert_eq!(route("_document.js"), None);
        assert_eq!(route("blog/loading.rs"), None);
        assert_eq!(route("not-found.rs"), None);
    }

    #[test]
    fn test_unknown_extensions_are_skipped() {
        assert_eq!(route("README.md"), None);
        assert_eq!(route("styles.css"), None);
        assert_eq!(route("Makefile"), None);
    }

    #[test]
    fn test_groups_slots_and_intercepts() {
        assert_eq!(route("(marketing)/about.rs"), Some("/about".to_string()));
        assert_eq!(route("dashboard/@analytics/page.rs"), None);
        assert_eq!(route("feed/(..)photo/[id].rs"), None);
        assert_eq!(route("feed/(.)/photo.rs"), None);
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = compile_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, SitemapError::InvalidPattern { .. }));
    }
}
