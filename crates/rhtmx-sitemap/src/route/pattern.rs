//! Segment classification for route templates
//!
//! Pure functional parsing of bracket notation into typed segments.
//! All functions are **pure**: same input → same output, no side effects.

/// A single path segment of a route template
///
/// Closed sum type: a template is classified once and the expander
/// pattern-matches on the variants instead of re-testing bracket syntax.
///
/// # Examples
///
/// ```
/// use rhtmx_sitemap::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about"), Segment::Static("about".to_string()));
/// assert_eq!(classify_segment("[id]"), Segment::Dynamic("id".to_string()));
/// assert_eq!(classify_segment("[...slug]"), Segment::CatchAll("slug".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text, copied verbatim into every concrete URL
    Static(String),
    /// Single parameter: `[id]`
    Dynamic(String),
    /// Catch-all parameter: `[...slug]`, may expand to several path components
    CatchAll(String),
}

impl Segment {
    /// Renders the segment back into template notation
    ///
    /// The mapping registry is keyed by original bracket notation, so prefixes
    /// are always rebuilt from this form, never from resolved values.
    pub fn source(&self) -> String {
        match self {
            Segment::Static(text) => text.clone(),
            Segment::Dynamic(name) => format!("[{}]", name),
            Segment::CatchAll(name) => format!("[...{}]", name),
        }
    }

    /// Parameter name for dynamic segments, `None` for static ones
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Dynamic(name) | Segment::CatchAll(name) => Some(name),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Segment::Static(_))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Segment::CatchAll(_))
    }
}

/// Classifies a segment into a [`Segment`] (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Catch-all**: `[...name]`
/// 2. **Dynamic**: `[name]`
/// 3. **Static**: any other text, including `[]`, `[...]`, nested brackets
///    and the optional catch-all notation `[[...name]]`
pub fn classify_segment(segment: &str) -> Segment {
    let inner = match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => inner,
        None => return Segment::Static(segment.to_string()),
    };

    match inner.strip_prefix("...") {
        Some(name) if is_valid_param_name(name) => Segment::CatchAll(name.to_string()),
        Some(_) => Segment::Static(segment.to_string()),
        None if is_valid_param_name(inner) => Segment::Dynamic(inner.to_string()),
        None => Segment::Static(segment.to_string()),
    }
}

/// A parameter name is non-empty and free of brackets and separators
fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['[', ']', '/'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_static() {
        let seg = classify_segment("about");
        assert_eq!(seg, Segment::Static("about".to_string()));
        assert!(!seg.is_dynamic());
        assert_eq!(seg.param_name(), None);
    }

    #[test]
    fn test_classify_dynamic() {
        let seg = classify_segment("[id]");
        assert_eq!(seg, Segment::Dynamic("id".to_string()));
        assert!(seg.is_dynamic());
        assert!(!seg.is_catch_all());
        assert_eq!(seg.param_name(), Some("id"));
    }

    #[test]
    fn test_classify_catch_all() {
        let seg = classify_segment("[...slug]");
        assert_eq!(seg, Segment::CatchAll("slug".to_string()));
        assert!(seg.is_catch_all());
        assert_eq!(seg.param_name(), Some("slug"));
    }

    #[test]
    fn test_classify_empty_brackets_are_static() {
        assert_eq!(classify_segment("[]"), Segment::Static("[]".to_string()));
        assert_eq!(classify_segment("[...]"), Segment::Static("[...]".to_string()));
    }

    #[test]
    fn test_classify_optional_catch_all_is_static() {
        assert_eq!(
            classify_segment("[[...slug]]"),
            Segment::Static("[[...slug]]".to_string())
        );
    }

    #[test]
    fn test_classify_partial_brackets_are_static() {
        assert_eq!(classify_segment("[id"), Segment::Static("[id".to_string()));
        assert_eq!(classify_segment("id]"), Segment::Static("id]".to_string()));
        assert_eq!(classify_segment("pre[id]"), Segment::Static("pre[id]".to_string()));
    }

    #[test]
    fn test_source_round_trips_notation() {
        for raw in ["about", "[id]", "[...slug]"] {
            assert_eq!(classify_segment(raw).source(), raw);
        }
    }
}
