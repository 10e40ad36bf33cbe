//! Mapping registry for dynamic route segments
//!
//! Every dynamic segment is resolved by the mapper registered for its
//! minimal prefix template (`/[page]`, `/[page]/[foo]`, ...). A mapper
//! receives the values already chosen for the ancestor segments and returns
//! the concrete values for its own segment.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use crate::path::normalize_path;

/// Ancestor parameter name → resolved value
///
/// Ordered so that its serialized form is stable across runs.
pub type RouteParams = BTreeMap<String, String>;

/// Trait for dynamic route mappers
#[async_trait]
pub trait DynamicRouteMapper: Send + Sync {
    /// Produce the concrete values for one dynamic segment
    ///
    /// `params` holds the values of every dynamic segment before this one
    /// (empty for the first). Returning an empty list drops the route; an
    /// error aborts the whole expansion.
    async fn map(&self, params: &RouteParams) -> Result<Vec<String>>;
}

/// Adapter turning an async closure into a [`DynamicRouteMapper`]
pub struct FnMapper<F>(F);

impl<F> FnMapper<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> DynamicRouteMapper for FnMapper<F>
where
    F: Fn(RouteParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<String>>> + Send + 'static,
{
    async fn map(&self, params: &RouteParams) -> Result<Vec<String>> {
        (self.0)(params.clone()).await
    }
}

/// Mapper with values known up front
///
/// Deserializes from either a plain list or a table keyed by the value of
/// one ancestor parameter:
///
/// ```toml
/// "/project/[id]" = ["42", "7"]
/// "/[page]/[foo]" = { param = "page", values = { page1 = ["foo1", "foo2"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticMapper {
    /// Same values regardless of ancestors
    List(Vec<String>),

    /// Values chosen by the resolved value of `param`
    Keyed {
        param: String,
        values: BTreeMap<String, Vec<String>>,
    },
}

#[async_trait]
impl DynamicRouteMapper for StaticMapper {
    async fn map(&self, params: &RouteParams) -> Result<Vec<String>> {
        let values = match self {
            StaticMapper::List(values) => values.clone(),
            StaticMapper::Keyed { param, values } => params
                .get(param)
                .and_then(|value| values.get(value))
                .cloned()
                .unwrap_or_default(),
        };

        Ok(values)
    }
}

/// Prefix template → mapper
///
/// Keys are normalized on insert and lookup, so `/[page]/` and `/[page]`
/// name the same entry.
#[derive(Clone, Default)]
pub struct MappingRegistry {
    mappers: BTreeMap<String, Arc<dyn DynamicRouteMapper>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapper (builder style)
    ///
    /// ```
    /// use rhtmx_sitemap::{MappingRegistry, StaticMapper};
    ///
    /// let registry = MappingRegistry::new()
    ///     .with_mapper("/[page]", StaticMapper::List(vec!["home".into()]));
    /// assert!(registry.contains("/[page]"));
    /// ```
    pub fn with_mapper(
        mut self,
        prefix: impl AsRef<str>,
        mapper: impl DynamicRouteMapper + 'static,
    ) -> Self {
        self.insert(prefix, Arc::new(mapper));
        self
    }

    /// Registers an async closure as mapper
    ///
    /// ```
    /// use rhtmx_sitemap::MappingRegistry;
    ///
    /// let registry = MappingRegistry::new().with_fn("/blog/[slug]", |_params| async {
    ///     anyhow::Ok(vec!["hello-world".to_string()])
    /// });
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn with_fn<F, Fut>(self, prefix: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(RouteParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<String>>> + Send + 'static,
    {
        self.with_mapper(prefix, FnMapper::new(f))
    }

    /// Registers a fixed list of values
    pub fn with_values<I, S>(self, prefix: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with_mapper(prefix, StaticMapper::List(values))
    }

    /// Registers a shared mapper, replacing any previous entry for the prefix
    pub fn insert(&mut self, prefix: impl AsRef<str>, mapper: Arc<dyn DynamicRouteMapper>) {
        let key = normalize_path(prefix.as_ref()).into_owned();
        self.mappers.insert(key, mapper);
    }

    pub fn get(&self, prefix: &str) -> Option<&Arc<dyn DynamicRouteMapper>> {
        self.mappers.get(normalize_path(prefix).as_ref())
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    /// Registered prefixes, sorted ascending
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl std::fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("prefixes", &self.mappers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_static_list_ignores_params() {
        let mapper = StaticMapper::List(vec!["a".into(), "b".into()]);
        assert_eq!(mapper.map(&params(&[("page", "x")])).await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_static_keyed_selects_by_param() {
        let mapper = StaticMapper::Keyed {
            param: "page".into(),
            values: BTreeMap::from([
                ("page1".to_string(), vec!["foo1".to_string(), "foo2".to_string()]),
                ("page2".to_string(), vec!["foo1".to_string()]),
            ]),
        };

        assert_eq!(mapper.map(&params(&[("page", "page1")])).await.unwrap(), vec!["foo1", "foo2"]);
        assert_eq!(mapper.map(&params(&[("page", "page2")])).await.unwrap(), vec!["foo1"]);
        assert!(mapper.map(&params(&[("page", "page3")])).await.unwrap().is_empty());
        assert!(mapper.map(&RouteParams::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fn_mapper_receives_params() {
        let registry = MappingRegistry::new().with_fn("/[page]/[id]", |params: RouteParams| async move {
            anyhow::Ok(vec![format!("{}-child", params["page"])])
        });

        let mapper = registry.get("/[page]/[id]").unwrap();
        let values = mapper.map(&params(&[("page", "p1")])).await.unwrap();
        assert_eq!(values, vec!["p1-child"]);
    }

    #[test]
    fn test_registry_normalizes_keys() {
        let registry = MappingRegistry::new().with_values("[page]/", ["a"]);
        assert!(registry.contains("/[page]"));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["/[page]"]);
    }

    #[test]
    fn test_static_mapper_deserializes_both_shapes() {
        #[derive(Deserialize)]
        struct Doc {
            mappings: BTreeMap<String, StaticMapper>,
        }

        let doc: Doc = toml::from_str(
            r#"
            [mappings]
            "/project/[id]" = ["42", "7"]
            "/[page]/[foo]" = { param = "page", values = { page1 = ["foo1"] } }
            "#,
        )
        .unwrap();

        assert_eq!(
            doc.mappings["/project/[id]"],
            StaticMapper::List(vec!["42".into(), "7".into()])
        );
        assert!(matches!(doc.mappings["/[page]/[foo]"], StaticMapper::Keyed { .. }));
    }
}
