//! HTTP API
//!
//! A single endpoint, `POST /api/backtest`, that runs one backtest per
//! request and returns the slices, trades and equity segments as JSON.

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use handlers::{method_not_allowed, run_backtest};
pub use types::{BacktestRequest, BacktestResponse, ErrorBody};

use crate::config::{BacktestSettings, ServerConfig};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Defaults for fields a request omits
    pub settings: BacktestSettings,
}

impl AppState {
    pub fn new(settings: BacktestSettings) -> Self {
        Self { settings }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/backtest",
            post(run_backtest).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(server: &ServerConfig, settings: BacktestSettings) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState::new(settings)));
    let addr = server.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Backtest API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
