//! HTTP server mode for paging through a JSON dataset

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;

use crate::cli::dataset::Dataset;
use crate::config::PaginationSettings;
use crate::error::{Error, Result};
use crate::pagination::PageRequest;
use crate::types::QueryParams;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// JSON file holding the items to serve
    pub input: PathBuf,
    /// Pagination settings
    pub settings: PaginationSettings,
}

/// App state shared across handlers
struct AppState {
    dataset: Dataset,
}

/// Build the router serving `dataset`
pub fn app(dataset: Dataset) -> Router {
    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/items", get(list_items))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { dataset }))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let dataset = Dataset::load(&config.input, &config.settings)?;
    tracing::info!(
        "Serving {} items from {} with {} pagination",
        dataset.len(),
        config.input.display(),
        dataset.policy().kind()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app(dataset))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Page through the dataset
async fn list_items(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<QueryParams>,
) -> Response {
    let mut request = PageRequest::from_params(params);
    if let Some(base) = request_url(&headers, &uri) {
        request = request.with_base_url(base);
    }

    match state.dataset.paginate(&request) {
        Ok(page) => Json(page).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Absolute URL of the request, from the Host header
///
/// The scheme comes from `X-Forwarded-Proto` when a TLS-terminating proxy
/// sets it, and defaults to `http`.
fn request_url(headers: &HeaderMap, uri: &Uri) -> Option<Url> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    Url::parse(&format!("{}://{host}{}", request_scheme(headers), uri.path())).ok()
}

fn request_scheme(headers: &HeaderMap) -> &'static str {
    let forwarded = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim);

    match forwarded {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}

fn error_response(error: &Error) -> Response {
    let status = match error {
        Error::InvalidPage { .. } => StatusCode::NOT_FOUND,
        e if e.is_pagination_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::warn!("Pagination failed: {}", error);
    }

    (
        status,
        Json(json!({
            "detail": error.detail(),
            "param": error.param(),
        })),
    )
        .into_response()
}
