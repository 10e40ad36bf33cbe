//! Sitemap generation for file-based routes
//!
//! Route templates use the RHTMX file-routing notation: `about` is static,
//! `[id]` is a dynamic segment and `[...slug]` a catch-all. Templates without
//! dynamic segments pass through unchanged; dynamic ones are expanded into
//! concrete URLs by mappers registered per prefix template.
//!
//! ```
//! use rhtmx_sitemap::{expand_routes, MappingRegistry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), rhtmx_sitemap::SitemapError> {
//! let registry = MappingRegistry::new()
//!     .with_values("/[page]", ["page1", "page2"])
//!     .with_fn("/[page]/[...rest]", |params| async move {
//!         anyhow::Ok(vec![format!("{}/intro", params["page"])])
//!     });
//!
//! let urls = expand_routes(&["/", "/[page]/[...rest]"], &registry, |warning| {
//!     eprintln!("{}", warning);
//! })
//! .await?;
//!
//! assert_eq!(urls, vec!["/", "/page1/page1/intro", "/page2/page2/intro"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`route`] - template parsing and segment classification
//! - [`mapping`] - mapper trait and registry
//! - [`expand`] - expansion with a per-run resolution cache
//! - [`discovery`] - templates from a pages directory
//! - [`xml`], [`write`], [`generator`] - document output
//! - [`config`] - `sitemap.toml`
//! - `handler` - axum delivery (feature `server`)

pub mod config;
pub mod discovery;
pub mod error;
pub mod expand;
pub mod generator;
pub mod mapping;
pub mod path;
pub mod route;
pub mod write;
pub mod xml;

#[cfg(feature = "server")]
pub mod handler;

pub use config::SitemapConfig;
pub use discovery::{discover_routes, DiscoveryOptions};
pub use error::{Result, SitemapError};
pub use expand::{expand_routes, log_warning, Diagnostic, Expansion, RouteExpander};
pub use generator::SitemapGenerator;
pub use mapping::{DynamicRouteMapper, FnMapper, MappingRegistry, RouteParams, StaticMapper};
pub use route::{classify_segment, RouteTemplate, Segment};
pub use write::write_sitemap;
pub use xml::generate_xml;

#[cfg(feature = "server")]
pub use handler::SitemapService;
