//! 健康检查与 metrics 端点

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use onyx_common::health::run_probes;

use super::state::AppState;

/// 单个探针超时
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Response {
    let report = run_probes(&state.probes, PROBE_TIMEOUT).await;

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report)).into_response()
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
