use anyhow::Result;
use colored::Colorize;
use rhtmx_sitemap::{discover_routes, generate_xml, write_sitemap};
use std::path::{Path, PathBuf};

use super::load_config;

/// Command-line values that take precedence over the config file
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub strict: bool,
}

pub fn execute(config_path: &Path, overrides: Overrides) -> Result<()> {
    println!("{}", "Generating sitemap...".green().bold());
    println!();

    let mut config = load_config(config_path)?;
    if let Some(output) = overrides.output {
        config.output = output.to_string_lossy().into_owned();
    }
    if let Some(base_url) = overrides.base_url {
        config.base_url = base_url;
    }
    config.strict |= overrides.strict;

    let templates = discover_routes(&config.discovery_options())?;
    println!("  {} {} route templates in {}", "📂".cyan(), templates.len(), config.pages_dir);

    let generator = config.generator(config.registry());
    let output = config.output_path();

    // Nothing is written unless every mapper succeeded
    let count = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let urls = generator
                .urls(&templates, |warning| println!("  {} {}", "⚠".yellow(), warning.yellow()))
                .await
                .map_err(|err| {
                    if err.is_mapping() {
                        println!("  {} {}", "✗".red(), "A mapper failed, no sitemap written".red());
                    }
                    err
                })?;

            write_sitemap(&output, &generate_xml(&urls)).await?;
            anyhow::Ok(urls.len())
        })?;

    println!();
    println!("{} Wrote {} urls to {}", "✓".green(), count, output.display());

    Ok(())
}
