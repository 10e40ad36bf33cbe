//! Sitemap file emission

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{Result, SitemapError};

/// Writes `xml` to `path`, creating missing parent directories
///
/// An existing file is replaced.
pub async fn write_sitemap(path: impl AsRef<Path>, xml: &str) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| SitemapError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    fs::write(path, xml).await.map_err(io_error)?;

    debug!("Wrote sitemap ({} bytes) to {:?}", xml.len(), path);
    Ok(())
}
