use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use clint_core::catalog::ViolationKind;
use clint_core::config::{ClintConfig, ServerConfig};
use clint_core::types::{CheckResult, Violation};
use clint_core::whitelist::{WhitelistCache, WhitelistConfig};
use clint_enforce::{AnalyzerError, Linter};

/// Request bounds, taken from the `server` section of `clint.json`.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_body_bytes: usize,
    pub max_source_bytes: usize,
    pub request_timeout: Duration,
}

impl From<&ServerConfig> for Limits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
            max_source_bytes: config.max_source_bytes,
            request_timeout: Duration::from_secs(config.request_timeout_seconds.max(1)),
        }
    }
}

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub linter: Arc<Linter>,
    pub whitelist: Arc<WhitelistConfig>,
    pub whitelist_cache: Arc<WhitelistCache>,
    pub limits: Limits,
}

impl AppState {
    pub fn new(linter: Arc<Linter>, config: &ClintConfig) -> Self {
        Self {
            linter,
            whitelist: Arc::new(config.whitelist()),
            whitelist_cache: Arc::new(WhitelistCache::default()),
            limits: Limits::from(&config.server),
        }
    }

    /// State with the analyzer command from `config`.
    pub fn from_config(config: &ClintConfig) -> Result<Self, AnalyzerError> {
        let linter = Linter::from_config(config)?;
        Ok(Self::new(Arc::new(linter), config))
    }

    fn whitelist_for(&self, query: &LintQuery) -> Arc<WhitelistConfig> {
        match &query.whitelist {
            Some(patterns) => self.whitelist_cache.get_or_build(patterns.split(',')),
            None => Arc::clone(&self.whitelist),
        }
    }
}

/// Build the axum router with all clint HTTP endpoints.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = DefaultBodyLimit::max(state.limits.max_body_bytes);

    Router::new()
        .route("/health", get(health))
        .route("/lint_base64", post(lint_base64))
        .route("/lint_gzip", post(lint_gzip))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "clint listening");
    axum::serve(listener, app).await
}

// --- Request / Response types ---

#[derive(Debug, Default, Deserialize)]
pub struct LintQuery {
    /// Comma-separated whitelist patterns replacing the configured set.
    pub whitelist: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub analyzer: String,
}

type LintResponse = (StatusCode, Json<CheckResult>);

// --- Handlers ---

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        analyzer: state.linter.analyzer_name().to_string(),
    })
}

async fn lint_base64(
    State(state): State<AppState>,
    Query(query): Query<LintQuery>,
    body: Bytes,
) -> LintResponse {
    // Encoders commonly wrap lines; whitespace is never part of the payload.
    let text: String = String::from_utf8_lossy(&body)
        .split_ascii_whitespace()
        .collect();
    match BASE64_STANDARD.decode(text.as_bytes()) {
        Ok(source) => lint_decoded(&state, &query, source).await,
        Err(e) => rejected(
            StatusCode::BAD_REQUEST,
            format!("Unable to decode base64: {e}"),
        ),
    }
}

async fn lint_gzip(
    State(state): State<AppState>,
    Query(query): Query<LintQuery>,
    body: Bytes,
) -> LintResponse {
    let limit = state.limits.max_source_bytes as u64 + 1;
    let mut source = Vec::new();
    let decoded = GzDecoder::new(&body[..]).take(limit).read_to_end(&mut source);
    match decoded {
        Ok(_) => lint_decoded(&state, &query, source).await,
        Err(e) => rejected(
            StatusCode::BAD_REQUEST,
            format!("Unable to decompress gzip: {e}"),
        ),
    }
}

async fn lint_decoded(state: &AppState, query: &LintQuery, source: Vec<u8>) -> LintResponse {
    if source.len() > state.limits.max_source_bytes {
        return rejected(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Source exceeds {} bytes",
                state.limits.max_source_bytes
            ),
        );
    }

    let source: Arc<str> = Arc::from(String::from_utf8_lossy(&source).as_ref());
    let whitelist = state.whitelist_for(query);
    let timeout = state.limits.request_timeout;
    tracing::debug!(bytes = source.len(), "linting request");

    match tokio::time::timeout(timeout, state.linter.lint(source, whitelist)).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "lint timed out");
            let detail = format!("lint timed out after {}s", timeout.as_secs());
            (
                StatusCode::OK,
                Json(CheckResult::single(
                    ViolationKind::InternalFault.violation(Some(&detail), None),
                )),
            )
        }
    }
}

fn rejected(status: StatusCode, message: String) -> LintResponse {
    tracing::debug!(%status, %message, "request rejected");
    (
        status,
        Json(CheckResult::single(Violation::module_level(message))),
    )
}
