//! Auth Routes
//!
//! Proxied Supabase authentication.
//!
//! - POST /api/v1/auth/signup - Create an account
//! - POST /api/v1/auth/login - Password sign-in
//! - POST /api/v1/auth/refresh - Exchange a refresh token

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{LoginRequest, RefreshRequest, SignUpRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::supabase::Session;

/// POST /api/v1/auth/signup
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<Session>)> {
    validate_credentials(&req.email, &req.password)?;

    let session = state
        .datasource
        .sign_up(&req.email, &req.password, req.nombre)
        .await?;

    tracing::info!(user_id = %session.user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Session>> {
    validate_credentials(&req.email, &req.password)?;

    let session = state.datasource.sign_in(&req.email, &req.password).await?;

    tracing::info!(user_id = %session.user.id, "User signed in");
    Ok(Json(session))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<Session>> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::Validation("refresh_token is required".to_string()));
    }

    let session = state.datasource.refresh_session(&req.refresh_token).await?;
    Ok(Json(session))
}

fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }
    if password.len() < 6 {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("ana@example.com", "secret1").is_ok());
        assert!(validate_credentials("", "secret1").is_err());
        assert!(validate_credentials("not-an-email", "secret1").is_err());
        assert!(validate_credentials("ana@example.com", "short").is_err());
    }
}
