//! Request handlers

use super::{ApiError, AppState, BacktestRequest, BacktestResponse};
use crate::backtest::BacktestSimulator;
use crate::telemetry;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// `POST /api/backtest`
///
/// The simulation runs on the blocking pool so a long run does not stall
/// the async workers.
pub async fn run_backtest(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BacktestRequest>, JsonRejection>,
) -> Result<Json<BacktestResponse>, ApiError> {
    let result = match payload {
        Ok(Json(request)) => tokio::task::spawn_blocking(move || execute(&state, request))
            .await
            .unwrap_or_else(|e| Err(ApiError::Internal(e.to_string()))),
        Err(rejection) => Err(rejection.into()),
    };
    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status().as_u16(),
    };
    telemetry::record_request(status);
    result.map(Json)
}

fn execute(state: &AppState, request: BacktestRequest) -> Result<BacktestResponse, ApiError> {
    let config = request.to_config(&state.settings);
    let seed = request
        .seed
        .or(state.settings.seed)
        .unwrap_or_else(rand::random);

    tracing::debug!(
        bars = request.bars().len(),
        strategy = %config.strategy,
        seed,
        "Backtest request"
    );

    let result = BacktestSimulator::new(config).run_seeded(request.bars(), seed)?;
    Ok(result.into())
}

/// Any method other than POST on the backtest route
pub async fn method_not_allowed() -> ApiError {
    telemetry::record_request(ApiError::MethodNotAllowed.status().as_u16());
    ApiError::MethodNotAllowed
}
