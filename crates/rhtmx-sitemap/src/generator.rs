//! Sitemap pipeline: expand → absolutize → serialize

use std::sync::Arc;

use crate::error::Result;
use crate::expand::RouteExpander;
use crate::mapping::MappingRegistry;
use crate::path::absolute_url;
use crate::xml::generate_xml;

/// Renders sitemap documents from route templates
///
/// Cheap to clone; the registry is shared. Each render runs its own
/// expansion, so results never leak between renders.
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    base_url: String,
    registry: Arc<MappingRegistry>,
    report_unused: bool,
}

impl SitemapGenerator {
    pub fn new(registry: impl Into<Arc<MappingRegistry>>) -> Self {
        Self {
            base_url: "/".to_string(),
            registry: registry.into(),
            report_unused: false,
        }
    }

    /// Site URL prefixed to every route (`https://my-site.com`)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn report_unused_mappings(mut self, enabled: bool) -> Self {
        self.report_unused = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Expands templates into absolute URLs, sorted
    pub async fn urls<S, W>(&self, templates: &[S], on_warning: W) -> Result<Vec<String>>
    where
        S: AsRef<str>,
        W: FnMut(&str),
    {
        let expansion = RouteExpander::new(&self.registry)
            .report_unused_mappings(self.report_unused)
            .expand(templates, on_warning)
            .await?;

        Ok(expansion
            .urls
            .iter()
            .map(|url| absolute_url(&self.base_url, url))
            .collect())
    }

    /// Expands templates and serializes the sitemap document
    ///
    /// ```
    /// use rhtmx_sitemap::{MappingRegistry, SitemapGenerator};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let generator = SitemapGenerator::new(MappingRegistry::new().with_values("/project/[id]", ["42"]))
    ///     .with_base_url("https://my-site.com");
    ///
    /// let xml = generator.render(&["/", "/project/[id]"], |_| {}).await.unwrap();
    /// assert!(xml.contains("<loc>https://my-site.com/project/42</loc>"));
    /// # }
    /// ```
    pub async fn render<S, W>(&self, templates: &[S], on_warning: W) -> Result<String>
    where
        S: AsRef<str>,
        W: FnMut(&str),
    {
        let urls = self.urls(templates, on_warning).await?;
        Ok(generate_xml(&urls))
    }
}
