use anyhow::Result;
use colored::Colorize;
use rhtmx_sitemap::{discover_routes, MappingRegistry, RouteTemplate};
use std::path::Path;

use super::load_config;

pub fn execute(config_path: &Path, pages: Option<&Path>) -> Result<()> {
    println!("{}", "Discovering routes...".green().bold());
    println!();

    let mut config = load_config(config_path)?;
    if let Some(pages) = pages {
        config.pages_dir = pages.to_string_lossy().into_owned();
    }

    let templates = discover_routes(&config.discovery_options())?;
    let registry = config.registry();

    println!("  {} Pages: {}", "📂".cyan(), config.pages_dir);
    println!();
    println!("{}", "Routes:".cyan().bold());

    let mut missing = 0;
    for source in &templates {
        let template = RouteTemplate::parse(source);

        if !template.is_dynamic() {
            println!("  {} {}", "→".green(), source);
            continue;
        }

        let unmapped = unmapped_prefixes(&template, &registry);
        if unmapped.is_empty() {
            println!("  {} {} {}", "→".green(), source, "(dynamic)".cyan());
        } else {
            missing += unmapped.len();
            println!(
                "  {} {} {}",
                "⚠".yellow(),
                source,
                format!("(no mapping for {})", unmapped.join(", ")).yellow()
            );
        }
    }

    println!();
    if missing == 0 {
        println!("{} {} routes", "✓".green(), templates.len());
    } else {
        println!(
            "{} {} routes, {} dynamic prefixes without a mapping",
            "⚠".yellow(),
            templates.len(),
            missing
        );
    }

    Ok(())
}

/// Dynamic prefixes of `template` with no registered mapper
fn unmapped_prefixes(template: &RouteTemplate, registry: &MappingRegistry) -> Vec<String> {
    template
        .dynamic_segments()
        .map(|index| template.prefix(index))
        .filter(|prefix| !registry.contains(prefix))
        .collect()
}
