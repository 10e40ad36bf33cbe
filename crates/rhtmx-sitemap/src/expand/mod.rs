//! Dynamic route expansion
//!
//! Turns route templates into concrete URLs. Each template is walked with an
//! explicit work stack of partial branches; every dynamic segment is resolved
//! by the mapper registered for its minimal prefix template, given the values
//! already chosen for the ancestor segments.
//!
//! ## Guarantees
//!
//! - A mapper runs at most once per (prefix, ancestor context) within one run.
//!   Sibling templates such as `/[page]/foo` and `/[page]/bar` share the
//!   `/[page]` resolution.
//! - Templates may arrive in any order: an ancestor prefix is resolved the
//!   first time any branch reaches it.
//! - The cache lives inside a single call. Two calls never share results.
//! - Output is sorted ascending. Duplicates produced by different templates
//!   are kept.
//! - A failing mapper aborts the run: no URLs and no warnings are produced.
//!
//! ## Branch lifecycle
//!
//! `PENDING(cursor) → RESOLVED(url) | DROPPED | SUSPENDED(awaiting mapper)`.
//! Every transition advances the cursor, so a branch finishes in at most as
//! many steps as its template has segments.

mod cache;
mod report;

pub use cache::{CacheKey, ResolutionCache};
pub use report::{log_warning, Diagnostic};

use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{Result, SitemapError};
use crate::mapping::{MappingRegistry, RouteParams};
use crate::path::join_segments;
use crate::route::{RouteTemplate, Segment};

/// Result of one expansion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Concrete URLs, sorted ascending
    pub urls: Vec<String>,
    /// Dynamic prefixes without a mapper, sorted and unique
    pub unmapped: Vec<String>,
    /// Registered prefixes never invoked (only when unused reporting is on)
    pub unused: Vec<String>,
    /// Number of mapper calls made
    pub invocations: usize,
    /// Number of resolutions answered from the cache
    pub cache_hits: usize,
}

impl Expansion {
    /// Diagnostics in reporting order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.unmapped
            .iter()
            .cloned()
            .map(Diagnostic::UnmappedRoute)
            .chain(self.unused.iter().cloned().map(Diagnostic::UnusedMapping))
            .collect()
    }
}

/// A partially expanded template
///
/// `concrete` holds the literal values of segments before `cursor`.
#[derive(Debug, Clone, Default)]
struct Branch {
    cursor: usize,
    concrete: Vec<String>,
    params: RouteParams,
}

impl Branch {
    /// Consumes the segment at the cursor, optionally binding a parameter
    fn advance(&self, value: String, param: Option<&str>) -> Self {
        let mut next = self.clone();
        if let Some(name) = param {
            next.params.insert(name.to_string(), value.clone());
        }
        next.concrete.push(value);
        next.cursor += 1;
        next
    }
}

/// Per-run resolution state
///
/// Created inside [`RouteExpander::expand`] and dropped at its end.
struct Resolver<'r> {
    registry: &'r MappingRegistry,
    cache: ResolutionCache,
    unmapped: BTreeSet<String>,
    invoked: BTreeSet<String>,
    invocations: usize,
}

impl<'r> Resolver<'r> {
    fn new(registry: &'r MappingRegistry) -> Self {
        Self {
            registry,
            cache: ResolutionCache::new(),
            unmapped: BTreeSet::new(),
            invoked: BTreeSet::new(),
            invocations: 0,
        }
    }

    /// Values for the dynamic segment closing `prefix` under `params`
    ///
    /// `None` when no mapper is registered for the prefix. Mappers are
    /// awaited one at a time, so the same key is never in flight twice and
    /// later branches always see the cached result.
    async fn resolve(&mut self, prefix: &str, params: &RouteParams) -> Result<Option<Vec<String>>> {
        let key = CacheKey::new(prefix, params)?;

        if let Some(values) = self.cache.get(&key) {
            return Ok(Some(values.to_vec()));
        }

        let registry = self.registry;
        let mapper = match registry.get(prefix) {
            Some(mapper) => mapper,
            None => {
                self.unmapped.insert(prefix.to_string());
                return Ok(None);
            }
        };

        debug!("Mapping dynamic route {} with {}", key.prefix(), key.context());
        self.invocations += 1;
        self.invoked.insert(prefix.to_string());

        let values = mapper
            .map(params)
            .await
            .map_err(|source| SitemapError::mapping(prefix, source))?;

        self.cache.insert(key, values.clone());
        Ok(Some(values))
    }

    /// Expands one template, appending its URLs to `urls`
    async fn expand_template(&mut self, template: &RouteTemplate, urls: &mut Vec<String>) -> Result<()> {
        let mut stack = vec![Branch::default()];

        while let Some(branch) = stack.pop() {
            let segment = match template.segments().get(branch.cursor) {
                Some(segment) => segment,
                None => {
                    urls.push(join_segments(&branch.concrete));
                    continue;
                }
            };

            match segment {
                Segment::Static(text) => stack.push(branch.advance(text.clone(), None)),
                Segment::Dynamic(name) | Segment::CatchAll(name) => {
                    let prefix = template.prefix(branch.cursor);
                    let values = match self.resolve(&prefix, &branch.params).await? {
                        Some(values) => values,
                        None => continue,
                    };

                    // Reversed so siblings pop in the order the mapper returned them
                    for value in values.into_iter().rev() {
                        stack.push(branch.advance(value, Some(name.as_str())));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Expands route templates through a [`MappingRegistry`]
///
/// # Examples
///
/// ```
/// use rhtmx_sitemap::{MappingRegistry, RouteExpander};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = MappingRegistry::new().with_values("/project/[id]", ["42", "7"]);
///
/// let expansion = RouteExpander::new(&registry)
///     .expand(&["/", "/contacts", "/project/[id]"], |_| {})
///     .await
///     .unwrap();
///
/// assert_eq!(expansion.urls, vec!["/", "/contacts", "/project/42", "/project/7"]);
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteExpander<'r> {
    registry: &'r MappingRegistry,
    report_unused: bool,
}

impl<'r> RouteExpander<'r> {
    pub fn new(registry: &'r MappingRegistry) -> Self {
        Self {
            registry,
            report_unused: false,
        }
    }

    /// Also report registered mappers that were never invoked
    pub fn report_unused_mappings(mut self, enabled: bool) -> Self {
        self.report_unused = enabled;
        self
    }

    /// Expands every template and reports diagnostics through `on_warning`
    ///
    /// Warnings are only emitted once all templates succeeded.
    pub async fn expand<S, W>(&self, templates: &[S], mut on_warning: W) -> Result<Expansion>
    where
        S: AsRef<str>,
        W: FnMut(&str),
    {
        let mut resolver = Resolver::new(self.registry);
        let mut urls = Vec::new();

        for template in templates {
            let template = RouteTemplate::parse(template.as_ref());
            resolver.expand_template(&template, &mut urls).await?;
        }

        urls.sort();

        let unused = if self.report_unused {
            self.registry
                .keys()
                .filter(|key| !resolver.invoked.contains(*key))
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        let expansion = Expansion {
            urls,
            unmapped: resolver.unmapped.into_iter().collect(),
            unused,
            invocations: resolver.invocations,
            cache_hits: resolver.cache.hits(),
        };

        for diagnostic in expansion.diagnostics() {
            on_warning(&diagnostic.to_string());
        }

        debug!(
            "Expanded {} templates into {} urls ({} mapper calls, {} cache hits)",
            templates.len(),
            expansion.urls.len(),
            expansion.invocations,
            expansion.cache_hits
        );

        Ok(expansion)
    }
}

/// Expands templates into sorted concrete URLs
///
/// Shorthand for [`RouteExpander::expand`] without unused-mapping reports.
pub async fn expand_routes<S, W>(
    templates: &[S],
    registry: &MappingRegistry,
    on_warning: W,
) -> Result<Vec<String>>
where
    S: AsRef<str>,
    W: FnMut(&str),
{
    let expansion = RouteExpander::new(registry).expand(templates, on_warning).await?;
    Ok(expansion.urls)
}
