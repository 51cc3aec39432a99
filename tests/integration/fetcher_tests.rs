//! HTTP fetch chain tests
//!
//! These tests use wiremock to stand in for the target site.

use sga_site_crawler::config::FetchConfig;
use sga_site_crawler::crawler::{FetchError, Fetcher, HttpFetcher};
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetchConfig::default()).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_html_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Hello</p></body></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let html = fetcher()
        .fetch_html(&format!("{}/page", mock_server.uri()), TIMEOUT)
        .await
        .expect("Fetch should succeed");

    assert!(html.contains("Hello"));
}

#[tokio::test]
async fn test_browser_failure_falls_back_to_plain_request() {
    let mock_server = MockServer::start().await;

    // Only the browser strategy sends Accept-Language
    Mock::given(method("GET"))
        .and(path("/guarded"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guarded"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Plain</p>"))
        .mount(&mock_server)
        .await;

    let html = fetcher()
        .fetch_html(&format!("{}/guarded", mock_server.uri()), TIMEOUT)
        .await
        .expect("Fallback should succeed");

    assert_eq!(html, "<p>Plain</p>");
}

#[tokio::test]
async fn test_every_strategy_failing_is_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_html(&format!("{}/gone", mock_server.uri()), TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Exhausted(_)));
    assert_eq!(
        err.to_string(),
        "all fetch strategies failed: browser(HTTP 404: Not Found); plain(HTTP 404: Not Found)"
    );
}

#[tokio::test]
async fn test_blank_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n "))
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_html(&format!("{}/blank", mock_server.uri()), TIMEOUT)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("browser(empty response body)"));
    assert!(err.to_string().contains("plain(empty response body)"));
}

#[tokio::test]
async fn test_robots_sent_with_crawl_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin\n"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher()
        .fetch_robots(
            &format!("{}/robots.txt", mock_server.uri()),
            "TestBot/1.0",
            TIMEOUT,
        )
        .await
        .expect("robots.txt should be fetched");

    assert!(body.contains("Disallow: /admin"));
}

#[tokio::test]
async fn test_missing_robots_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_robots(
            &format!("{}/robots.txt", mock_server.uri()),
            "TestBot/1.0",
            TIMEOUT,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_redirect_into_private_host_refused() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hop"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/internal", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/internal"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>metadata</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_html(&format!("{}/hop", mock_server.uri()), TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Exhausted(_)));
}
