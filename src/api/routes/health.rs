//! Health Routes
//!
//! Health check endpoints for monitoring and deployment probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data source reachable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the data source answers its health probe.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.datasource.health_check().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with data source details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let datasource_ok = state.datasource.health_check().await.is_ok();

    let (overall, datasource_status) = if datasource_ok {
        ("healthy", "ok")
    } else {
        ("degraded", "error")
    };

    Json(HealthResponse {
        status: overall.to_string(),
        datasource: state.datasource.name().to_string(),
        datasource_status: datasource_status.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
