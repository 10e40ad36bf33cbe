use anyhow::Result;
use colored::Colorize;
use std::path::Path;

#[cfg(feature = "dev-server")]
pub fn execute(config_path: &Path, port: u16) -> Result<()> {
    use rhtmx_sitemap::SitemapService;

    println!("{}", "Starting sitemap server...".green().bold());
    println!();

    let config = super::load_config(config_path)?;
    let service = SitemapService::from_config(&config)?;

    println!("  {} {} route templates in {}", "📂".cyan(), service.templates().len(), config.pages_dir);
    println!("  {} Cache-Control: {}", "⚙".cyan(), service.cache_control());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let app = service.router("/sitemap.xml");

            let addr = format!("127.0.0.1:{}", port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!();
            println!("{}", "✅ Server ready!".green().bold());
            println!();
            println!("  {} {}", "URL:".cyan(), format!("http://localhost:{}/sitemap.xml", port).bold());
            println!("  {} Press Ctrl+C to stop", "ℹ".cyan());
            println!();

            axum::serve(listener, app).await?;
            anyhow::Ok(())
        })
}

#[cfg(not(feature = "dev-server"))]
pub fn execute(_config_path: &Path, _port: u16) -> Result<()> {
    println!("{}", "⚠ Sitemap server not available".yellow());
    println!();
    println!("Serving requires the 'dev-server' feature.");
    println!("Rebuild with: cargo build --features dev-server");
    Ok(())
}
