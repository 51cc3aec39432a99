//! HTTP API: application state, route handlers and router construction
//!
//! Routes:
//! - `POST /v0/scrape`: extract one page
//! - `POST /v0/site_crawl`: bounded crawl of one site
//! - `GET /health`: liveness probe
//!
//! Every failure uses the same envelope: `{success: false, error_code, error}`.

use crate::config::{Config, CrawlRequest};
use crate::crawler::{crawl_site, scrape_page, Fetcher, HttpFetcher, ScrapeError, ScrapeResult};
use crate::output::CrawlReport;
use crate::CrawlError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "sga-site-crawler";

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn Fetcher>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: Config) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
        }
    }
}

/// Successful response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiFailure {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Handler error carrying its HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiFailure,
}

impl ApiError {
    fn new(status: StatusCode, error_code: Option<&str>, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiFailure {
                success: false,
                error_code: error_code.map(str::to_string),
                error: error.into(),
            },
        }
    }
}

impl From<CrawlError> for ApiError {
    fn from(error: CrawlError) -> Self {
        let status = match error {
            CrawlError::ForbiddenHost { .. } => StatusCode::FORBIDDEN,
            CrawlError::InvalidUrl(_) | CrawlError::InvalidParam(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, Some(error.error_code()), error.to_string())
    }
}

impl From<ScrapeError> for ApiError {
    fn from(error: ScrapeError) -> Self {
        match error {
            ScrapeError::Rejected(rejected) => rejected.into(),
            fetch @ ScrapeError::Fetch(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, None, fetch.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
    })
}

pub async fn scrape_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiSuccess<ScrapeResult>>, ApiError> {
    let url = body
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            ApiError::from(CrawlError::InvalidParam("URL is required".to_string()))
        })?;

    let result = scrape_page(
        state.fetcher.as_ref(),
        url,
        state.config.fetch.scrape_timeout(),
    )
    .await
    .map_err(|e| {
        tracing::warn!("Scrape of {} failed: {}", url, e);
        ApiError::from(e)
    })?;

    Ok(Json(ApiSuccess::new(result)))
}

pub async fn site_crawl_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiSuccess<CrawlReport>>, ApiError> {
    let options = CrawlRequest::from_json(body)?.into_options()?;

    let report = crawl_site(&options, state.fetcher.as_ref())
        .await
        .map_err(|e| {
            tracing::info!("Crawl of {} rejected: {}", options.start_url, e);
            ApiError::from(e)
        })?;

    Ok(Json(ApiSuccess::new(report)))
}

/// Builds the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v0/scrape", post(scrape_handler))
        .route("/v0/site_crawl", post(site_crawl_handler))
        .with_state(state)
}

/// Serves the API on the configured bind address until the process stops
pub async fn serve(config: Config) -> crate::Result<()> {
    let bind_address = config.server.bind_address.clone();
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let app = create_router(AppState::new(Arc::new(fetcher), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
