//! Server-side CoinGecko proxy.
//!
//! Holds the API key so it never reaches the browser, applies the upstream
//! timeout and turns every CoinGecko failure into a JSON `{error, code}` body
//! with a matching status.
//!
//! | Route                              | Upstream                        |
//! |------------------------------------|---------------------------------|
//! | `GET /api/coins/markets`           | `/coins/markets`                |
//! | `GET /api/coins/{id}`              | `/coins/{id}`                   |
//! | `GET /api/coins/{id}/market_chart` | `/coins/{id}/market_chart`      |
//! | `GET /health`                      | none                            |

pub mod config;
pub mod handlers;
pub mod upstream;

pub use config::ProxyConfig;
pub use upstream::CoinGeckoUpstream;

use crate::error::UpstreamError;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: Arc<CoinGeckoUpstream>,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            upstream: Arc::new(CoinGeckoUpstream::new(config)?),
        })
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.envelope())).into_response()
    }
}

/// Build the app. Browsers call it cross-origin, so GET is open to any origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/coins/markets", get(handlers::markets))
        .route("/api/coins/{id}", get(handlers::coin))
        .route("/api/coins/{id}/market_chart", get(handlers::market_chart))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already-bound listener until the process stops.
pub async fn serve_listener(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

/// Bind `config.bind_addr` and serve.
pub async fn serve(config: ProxyConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if config.api_key.is_none() {
        tracing::warn!("No CoinGecko API key configured; data routes will answer 500");
    }
    tracing::info!(
        upstream = %config.upstream_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Starting cryptodash proxy"
    );

    let state = AppState::new(&config)?;
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Proxy listening");

    serve_listener(listener, state).await?;
    Ok(())
}
