//! HTTP API tests driven through the router without a network listener

use crate::common::{html_page, StaticSite};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sga_site_crawler::api::{create_router, AppState};
use sga_site_crawler::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

fn app(site: StaticSite) -> Router {
    create_router(AppState::new(Arc::new(site), Config::default()))
}

fn demo_site() -> StaticSite {
    StaticSite::new()
        .page(
            "https://example.com/",
            &html_page("Home", "Welcome to the demo", &["/pricing"]),
        )
        .page(
            "https://example.com/pricing",
            &html_page("Pricing", "Plans and pricing", &[]),
        )
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app(StaticSite::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "sga-site-crawler");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_site_crawl_success() {
    let (status, body) = post_json(
        app(demo_site()),
        "/v0/site_crawl",
        json!({"start_url": "https://example.com", "query": "pricing", "max_depth": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["start_url"], "https://example.com/");
    assert_eq!(data["crawled_count"], 2);
    assert_eq!(data["mode_used"], "http");
    assert_eq!(data["pages"][0]["url"], "https://example.com/pricing");
    assert_eq!(data["pages"][0]["title"], "Pricing");
    assert!(data["failures"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_site_crawl_missing_start_url() {
    let (status, body) = post_json(app(demo_site()), "/v0/site_crawl", json!({"query": "x"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "INVALID_PARAM");
    assert_eq!(body["error"], "start_url is required");
}

#[tokio::test]
async fn test_site_crawl_non_object_body() {
    let (status, body) = post_json(app(demo_site()), "/v0/site_crawl", json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_PARAM");
}

#[tokio::test]
async fn test_site_crawl_invalid_url() {
    let (status, body) = post_json(
        app(demo_site()),
        "/v0/site_crawl",
        json!({"start_url": "ftp://example.com/"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_URL");
}

#[tokio::test]
async fn test_site_crawl_private_host_forbidden() {
    let (status, body) = post_json(
        app(demo_site()),
        "/v0/site_crawl",
        json!({"start_url": "http://10.0.0.8/admin"}),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "FORBIDDEN_HOST");
}

#[tokio::test]
async fn test_scrape_success() {
    let (status, body) = post_json(
        app(demo_site()),
        "/v0/scrape",
        json!({"url": "https://example.com/pricing"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Pricing");
    assert_eq!(body["data"]["url"], "https://example.com/pricing");
    assert_eq!(body["data"]["metadata"]["language"], "zh");
    assert!(body["data"]["markdown"]
        .as_str()
        .unwrap()
        .starts_with("# Pricing"));
}

#[tokio::test]
async fn test_scrape_requires_url() {
    let (status, body) = post_json(app(demo_site()), "/v0/scrape", json!({"url": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_PARAM");
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_scrape_fetch_failure() {
    let (status, body) = post_json(
        app(demo_site()),
        "/v0/scrape",
        json!({"url": "https://example.com/nowhere"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body.get("error_code").is_none());
    assert_eq!(body["error"], "Failed to fetch page: HTTP 404: Not Found");
}
