pub mod generate;
pub mod routes;
pub mod serve;

use anyhow::Result;
use colored::Colorize;
use rhtmx_sitemap::SitemapConfig;
use std::path::Path;

/// Loads the config, noting when defaults are used
pub(crate) fn load_config(path: &Path) -> Result<SitemapConfig> {
    if path.exists() {
        println!("  {} Config: {}", "⚙".cyan(), path.display());
    } else {
        println!("  {} Config: {} {}", "⚙".cyan(), path.display(), "(not found, using defaults)".dimmed());
    }

    SitemapConfig::load(path)
}
