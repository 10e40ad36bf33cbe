mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "rhtmx-sitemap")]
#[command(version, about = "RHTMX Sitemap - sitemap.xml for file-based routes", long_about = None)]
struct Cli {
    /// Log every mapper call
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List route templates and the dynamic prefixes missing a mapping
    Routes {
        /// Config file
        #[arg(short, long, default_value = "sitemap.toml")]
        config: PathBuf,

        /// Pages directory (overrides the config)
        #[arg(short, long)]
        pages: Option<PathBuf>,
    },

    /// Generate the sitemap file
    Generate {
        /// Config file
        #[arg(short, long, default_value = "sitemap.toml")]
        config: PathBuf,

        /// Output file (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Site URL prefixed to every route, e.g. https://my-site.com
        #[arg(long)]
        base_url: Option<String>,

        /// Also warn about mappings no route uses
        #[arg(long)]
        strict: bool,
    },

    /// Serve /sitemap.xml, regenerated on every request
    Serve {
        /// Config file
        #[arg(short, long, default_value = "sitemap.toml")]
        config: PathBuf,

        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    // Execute command
    match cli.command {
        Commands::Routes { config, pages } => {
            commands::routes::execute(&config, pages.as_deref())?;
        }
        Commands::Generate {
            config,
            output,
            base_url,
            strict,
        } => {
            let overrides = commands::generate::Overrides {
                output,
                base_url,
                strict,
            };
            commands::generate::execute(&config, overrides)?;
        }
        Commands::Serve { config, port } => {
            commands::serve::execute(&config, port)?;
        }
    }

    Ok(())
}
