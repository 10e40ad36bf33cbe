//! Resolution cache scoped to a single expansion run

use std::collections::HashMap;

use crate::error::Result;
use crate::mapping::RouteParams;

/// Identifies one mapper invocation: prefix template + ancestor context
///
/// The context is the JSON form of the ancestor params. `RouteParams` is a
/// `BTreeMap`, so equal contexts always serialize to equal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    prefix: String,
    context: String,
}

impl CacheKey {
    pub fn new(prefix: &str, params: &RouteParams) -> Result<Self> {
        Ok(Self {
            prefix: prefix.to_string(),
            context: serde_json::to_string(params)?,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Values already produced by mappers during the current run
///
/// Owned by exactly one expansion call and dropped with it, so a long-lived
/// process never serves values computed for an earlier request.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<CacheKey, Vec<String>>,
    hits: usize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key, counting the hit
    pub fn get(&mut self, key: &CacheKey) -> Option<&[String]> {
        let values = self.entries.get(key)?;
        self.hits += 1;
        Some(values)
    }

    pub fn insert(&mut self, key: CacheKey, values: Vec<String>) {
        self.entries.insert(key, values);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }
}
