// File: src/config.rs
// Purpose: Sitemap configuration parsing from sitemap.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::discovery::{DiscoveryOptions, DEFAULT_EXTENSIONS, DEFAULT_IGNORE};
use crate::generator::SitemapGenerator;
use crate::mapping::{MappingRegistry, StaticMapper};

pub const DEFAULT_CONFIG_FILE: &str = "sitemap.toml";

/// Sitemap configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Site URL prefixed to every route (default: "/", i.e. relative)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory containing page files (default: "pages")
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Where `generate` writes the document
    #[serde(default = "default_output")]
    pub output: String,

    /// Also warn about mappings no template used
    #[serde(default)]
    pub strict: bool,

    /// Overrides the served `Cache-Control` header
    #[serde(default)]
    pub cache_control: Option<String>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Globs relative to `pages_dir`
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Prefix template → fixed values
    #[serde(default)]
    pub mappings: BTreeMap<String, StaticMapper>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages_dir: default_pages_dir(),
            output: default_output(),
            strict: false,
            cache_control: None,
            extensions: default_extensions(),
            ignore: default_ignore(),
            mappings: BTreeMap::new(),
        }
    }
}

// Default values
fn default_base_url() -> String {
    "/".to_string()
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_output() -> String {
    "public/sitemap.xml".to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

impl SitemapConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SitemapConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from `sitemap.toml` in the current directory
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Registry with one [`StaticMapper`] per configured mapping
    pub fn registry(&self) -> MappingRegistry {
        self.mappings
            .iter()
            .fold(MappingRegistry::new(), |registry, (prefix, mapper)| {
                registry.with_mapper(prefix, mapper.clone())
            })
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions::new(&self.pages_dir)
            .with_extensions(self.extensions.iter().cloned())
            .with_ignore(self.ignore.iter().cloned())
    }

    /// Generator over `registry`, honoring `base_url` and `strict`
    pub fn generator(&self, registry: impl Into<Arc<MappingRegistry>>) -> SitemapGenerator {
        SitemapGenerator::new(registry)
            .with_base_url(self.base_url.clone())
            .report_unused_mappings(self.strict)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output)
    }
}
