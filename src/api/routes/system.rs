//! System Diagnostic Routes
//!
//! - GET /api/v1/ping - Round-trip check
//! - GET /api/v1/env-check - Deployment environment sanity check

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::StatusResponse;
use crate::api::state::AppState;

/// GET /api/v1/ping
pub async fn ping() -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        status: "ok".to_string(),
        message: "pong".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/v1/env-check
///
/// Reports whether the Supabase settings are present without echoing
/// their values.
pub async fn env_check(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let env = &state.env;

    let (success, status, message) = if env.datasource_mode == "mock" {
        (
            true,
            "ok".to_string(),
            "mock data source active, Supabase settings not required".to_string(),
        )
    } else if env.supabase_url_set && env.supabase_key_set {
        (
            true,
            "ok".to_string(),
            "Supabase URL and anon key configured".to_string(),
        )
    } else {
        let mut missing = Vec::new();
        if !env.supabase_url_set {
            missing.push("supabase.url");
        }
        if !env.supabase_key_set {
            missing.push("supabase.anon_key");
        }
        (
            false,
            "misconfigured".to_string(),
            format!("missing settings: {}", missing.join(", ")),
        )
    };

    Json(StatusResponse {
        success,
        status,
        message,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
