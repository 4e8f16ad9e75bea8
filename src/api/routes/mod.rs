//! Route Handlers
//!
//! One module per dashboard feature plus health and system diagnostics.

pub mod auth;
pub mod categories;
pub mod credits;
pub mod expenses;
pub mod goals;
pub mod health;
pub mod incomes;
pub mod reports;
pub mod suggestions;
pub mod system;

use axum::http::HeaderMap;

use crate::api::error::{ApiError, ApiResult};
use crate::datasource::UserScope;
use crate::model::Month;

/// Pull the bearer token out of the Authorization header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

/// Build the caller scope for a data operation.
pub(crate) fn user_scope(usuario_id: &str, headers: &HeaderMap) -> ApiResult<UserScope> {
    if usuario_id.trim().is_empty() {
        return Err(ApiError::Validation("usuario_id is required".to_string()));
    }
    Ok(UserScope::new(usuario_id, bearer_token(headers)))
}

/// Parse an optional `YYYY-MM` month parameter.
pub(crate) fn parse_month(value: Option<&str>) -> ApiResult<Option<Month>> {
    match value {
        None => Ok(None),
        Some(raw) => Month::parse(raw).map(Some).ok_or_else(|| {
            ApiError::Validation(format!("invalid month '{}', expected YYYY-MM", raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));

        headers.insert(AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_user_scope_requires_id() {
        let headers = HeaderMap::new();
        assert!(user_scope("", &headers).is_err());
        assert!(user_scope("  ", &headers).is_err());

        let scope = user_scope("u-1", &headers).unwrap();
        assert_eq!(scope.user_id, "u-1");
        assert!(scope.access_token.is_none());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month(None).unwrap(), None);
        assert!(parse_month(Some("2025-03")).unwrap().is_some());
        assert!(parse_month(Some("bogus")).is_err());
    }
}
