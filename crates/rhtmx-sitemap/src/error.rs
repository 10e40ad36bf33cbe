//! Error types for sitemap generation
//!
//! Only fatal conditions live here. Unmapped routes and unused mappings are
//! non-fatal and reported as [`crate::Diagnostic`]s instead.

use std::path::PathBuf;

/// Boxed error returned by a failing mapper
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// A registered mapper failed; aborts the whole expansion
    #[error("Mapping for dynamic route {route} failed: {source}")]
    Mapping {
        route: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to build resolution cache key: {0}")]
    CacheKey(#[from] serde_json::Error),

    #[error("Failed to read pages directory {path:?}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No pages found in {path:?}")]
    NoRoutes { path: PathBuf },

    #[error("Failed to write sitemap to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SitemapError {
    /// Wraps a mapper failure, keeping the original error as the source
    pub fn mapping(route: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Mapping {
            route: route.into(),
            source: source.into(),
        }
    }

    /// Whether the failure came from a user-supplied mapper
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }
}

pub type Result<T, E = SitemapError> = std::result::Result<T, E>;
