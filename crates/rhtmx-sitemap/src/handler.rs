//! HTTP delivery of the sitemap through axum
//!
//! Every GET runs a fresh expansion, so a long-running server always serves
//! the values the mappers return at request time.

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::config::SitemapConfig;
use crate::discovery::discover_routes;
use crate::error::{Result, SitemapError};
use crate::expand::log_warning;
use crate::generator::SitemapGenerator;

pub type WarningHandler = Arc<dyn Fn(&str) + Send + Sync>;
pub type ErrorHandler = Arc<dyn Fn(&SitemapError) + Send + Sync>;

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// `Cache-Control` used when none is configured
pub fn default_cache_control() -> &'static str {
    if cfg!(debug_assertions) {
        "public, max-age=0"
    } else {
        "public, max-age=3600"
    }
}

fn log_error(err: &SitemapError) {
    tracing::error!("Failed to generate sitemap: {}", err);
}

/// Serves a sitemap document for a fixed set of route templates
#[derive(Clone)]
pub struct SitemapService {
    generator: SitemapGenerator,
    templates: Arc<Vec<String>>,
    cache_control: Option<HeaderValue>,
    on_warning: WarningHandler,
    on_error: ErrorHandler,
}

impl SitemapService {
    pub fn new(generator: SitemapGenerator, templates: Vec<String>) -> Self {
        Self {
            generator,
            templates: Arc::new(templates),
            cache_control: None,
            on_warning: Arc::new(log_warning),
            on_error: Arc::new(log_error),
        }
    }

    /// Discovers templates and builds the service from a configuration
    pub fn from_config(config: &SitemapConfig) -> Result<Self> {
        let templates = discover_routes(&config.discovery_options())?;
        let service = Self::new(config.generator(config.registry()), templates);

        Ok(match &config.cache_control {
            Some(value) => service.with_cache_control(value.clone()),
            None => service,
        })
    }

    /// Overrides `Cache-Control`
    ///
    /// An invalid header value is rejected here, with a warning, and the
    /// default stays in effect.
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        match HeaderValue::from_str(&value) {
            Ok(header) => self.cache_control = Some(header),
            Err(_) => tracing::warn!("Ignoring invalid Cache-Control value {:?}", value),
        }
        self
    }

    pub fn with_warning_handler(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_warning = Arc::new(handler);
        self
    }

    /// Receives the original error whenever a request fails with 500
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&SitemapError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Arc::new(handler);
        self
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn cache_control(&self) -> &str {
        self.cache_control
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .unwrap_or(default_cache_control())
    }

    /// Renders the document, forwarding warnings to the warning handler
    pub async fn render(&self) -> Result<String> {
        let on_warning = Arc::clone(&self.on_warning);
        self.generator
            .render(self.templates.as_slice(), |message| on_warning(message))
            .await
    }

    /// Mounts the service at `path` on a new router
    pub fn router(self, path: &str) -> Router {
        Router::new()
            .route(path, any(sitemap_handler))
            .with_state(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    error: &'static str,
    message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Error"),
        message: message.into(),
    };

    (status, Json(body)).into_response()
}

async fn sitemap_handler(State(service): State<SitemapService>, method: Method) -> Response {
    if method != Method::GET {
        let mut response = error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Method {} is not supported for this endpoint", method),
        );
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET"));
        return response;
    }

    match service.render().await {
        Ok(xml) => {
            let cache_control = service
                .cache_control
                .clone()
                .unwrap_or_else(|| HeaderValue::from_static(default_cache_control()));

            (
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/xml")),
                    (header::CACHE_CONTROL, cache_control),
                ],
                xml,
            )
                .into_response()
        }
        Err(err) => {
            (service.on_error)(&err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
