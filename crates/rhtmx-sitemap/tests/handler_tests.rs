#![cfg(feature = "server")]

/// Integration tests for serving the sitemap over HTTP

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use rhtmx_sitemap::handler::default_cache_control;
use rhtmx_sitemap::{MappingRegistry, SitemapGenerator, SitemapService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn templates() -> Vec<String> {
    ["/", "/contacts", "/project/[id]", "/[lang]"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn service() -> SitemapService {
    let registry = MappingRegistry::new().with_values("/project/[id]", ["42", "7"]);
    let generator = SitemapGenerator::new(registry).with_base_url("https://my-site.com");
    SitemapService::new(generator, templates())
}

async fn send(app: Router, method: Method) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri("/sitemap.xml")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_get_serves_xml() {
    let warnings = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&warnings);

    let app = service()
        .with_warning_handler(move |message| sink.lock().unwrap().push(message.to_string()))
        .router("/sitemap.xml");

    let (status, headers, body) = send(app, Method::GET).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/xml");
    assert_eq!(headers[header::CACHE_CONTROL], default_cache_control());
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(body.contains("<url><loc>https://my-site.com/project/42</loc></url>"));
    assert!(body.contains("<url><loc>https://my-site.com/project/7</loc></url>"));
    assert!(!body.contains("[lang]"));

    assert_eq!(
        *warnings.lock().unwrap(),
        vec!["Unmapped dynamic route: /[lang]".to_string()]
    );
}

#[tokio::test]
async fn test_cache_control_override() {
    let app = service()
        .with_cache_control("public, max-age=600")
        .router("/sitemap.xml");

    let (_, headers, _) = send(app, Method::GET).await;

    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=600");
}

#[tokio::test]
async fn test_invalid_cache_control_serves_default() {
    let app = service()
        .with_cache_control("max-age=600\r\nSet-Cookie: a=b")
        .router("/sitemap.xml");

    let (status, headers, _) = send(app, Method::GET).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], default_cache_control());
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, headers, body) = send(service().router("/sitemap.xml"), method.clone()).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers[header::ALLOW], "GET");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({
                "statusCode": 405,
                "error": "Method Not Allowed",
                "message": format!("Method {} is not supported for this endpoint", method),
            })
        );
    }
}

#[tokio::test]
async fn test_mapping_failure_is_internal_error() {
    let registry = MappingRegistry::new().with_fn("/project/[id]", |_params| async {
        Err::<Vec<String>, _>(anyhow::anyhow!("database unavailable"))
    });
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);

    let app = SitemapService::new(SitemapGenerator::new(registry), templates())
        .with_error_handler(move |err| sink.lock().unwrap().push(err.to_string()))
        .router("/sitemap.xml");

    let (status, _, body) = send(app, Method::GET).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        r#"{"statusCode":500,"error":"Internal Server Error","message":"An internal server error occurred"}"#
    );

    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("database unavailable"));
}

#[tokio::test]
async fn test_each_request_runs_mappers_again() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let registry = MappingRegistry::new().with_fn("/project/[id]", move |_params| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move { anyhow::Ok(vec![format!("v{}", n)]) }
    });
    let app = SitemapService::new(SitemapGenerator::new(registry), templates()).router("/sitemap.xml");

    let (_, _, first) = send(app.clone(), Method::GET).await;
    let (_, _, second) = send(app, Method::GET).await;

    assert!(first.contains("/project/v0"));
    assert!(second.contains("/project/v1"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
