//! Route templates for file-based routing
//!
//! A template such as `/[page]/[id]/detail` is parsed once into an ordered
//! list of [`Segment`]s. Parsing is pure and never fails: a template without
//! bracket segments is simply all-static.

pub mod pattern;

pub use pattern::{classify_segment, Segment};

use crate::path::normalize_path;

/// An immutable, classified route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a template string into classified segments
    ///
    /// The input is normalized first (`pages//blog/` → `/pages/blog`), so the
    /// root template `/` has zero segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_sitemap::route::{RouteTemplate, Segment};
    ///
    /// let template = RouteTemplate::parse("/blog/[slug]");
    /// assert_eq!(template.segments(), &[
    ///     Segment::Static("blog".to_string()),
    ///     Segment::Dynamic("slug".to_string()),
    /// ]);
    /// assert!(RouteTemplate::parse("/").segments().is_empty());
    /// ```
    pub fn parse(template: &str) -> Self {
        let source = normalize_path(template).into_owned();
        let segments = source
            .split('/')
            .filter(|s| !s.is_empty())
            .map(classify_segment)
            .collect();

        Self { source, segments }
    }

    /// The normalized template string
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment needs a mapping to become concrete
    pub fn is_dynamic(&self) -> bool {
        self.segments.iter().any(Segment::is_dynamic)
    }

    /// Indices of the dynamic segments, in template order
    pub fn dynamic_segments(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, seg)| seg.is_dynamic())
            .map(|(idx, _)| idx)
    }

    /// Parameter names of the dynamic segments, in template order
    pub fn param_names(&self) -> Vec<&str> {
        self.segments.iter().filter_map(Segment::param_name).collect()
    }

    /// Minimal prefix template ending at (and including) segment `index`
    ///
    /// Always rendered in original bracket notation, since that is what the
    /// mapping registry is keyed by.
    ///
    /// ```
    /// use rhtmx_sitemap::route::RouteTemplate;
    ///
    /// let template = RouteTemplate::parse("/[page]/[foo]/barz/[bar]");
    /// assert_eq!(template.prefix(1), "/[page]/[foo]");
    /// assert_eq!(template.prefix(3), "/[page]/[foo]/barz/[bar]");
    /// ```
    pub fn prefix(&self, index: usize) -> String {
        let end = (index + 1).min(self.segments.len());
        let joined = self.segments[..end]
            .iter()
            .map(Segment::source)
            .collect::<Vec<_>>()
            .join("/");

        format!("/{}", joined)
    }
}

impl std::fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static() {
        let template = RouteTemplate::parse("/contacts");
        assert_eq!(template.segments(), &[Segment::Static("contacts".to_string())]);
        assert!(!template.is_dynamic());
    }

    #[test]
    fn test_parse_root() {
        let template = RouteTemplate::parse("/");
        assert!(template.segments().is_empty());
        assert_eq!(template.as_str(), "/");
    }

    #[test]
    fn test_parse_normalizes_input() {
        let template = RouteTemplate::parse("project//[id]/");
        assert_eq!(template.as_str(), "/project/[id]");
        assert_eq!(template.param_names(), vec!["id"]);
    }

    #[test]
    fn test_parse_mixed() {
        let template = RouteTemplate::parse("/[page]/[...rest]/detail");
        assert_eq!(
            template.segments(),
            &[
                Segment::Dynamic("page".to_string()),
                Segment::CatchAll("rest".to_string()),
                Segment::Static("detail".to_string()),
            ]
        );
        assert_eq!(template.dynamic_segments().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_prefix_uses_bracket_notation() {
        let template = RouteTemplate::parse("/foo/[...foo]/barz");
        assert_eq!(template.prefix(1), "/foo/[...foo]");
    }
}
