//! Income Routes
//!
//! CRUD endpoints for the ingresos module.
//!
//! - GET /api/v1/incomes - List, filtered by user and optionally month/category
//! - POST /api/v1/incomes - Create
//! - PUT /api/v1/incomes/:id - Partial update
//! - DELETE /api/v1/incomes/:id - Delete

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{IncomeListResponse, OwnerParams, RecordListParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::{parse_month, user_scope};
use crate::api::state::AppState;
use crate::model::{Income, IncomeChanges, NewIncome, RecordFilter};

/// GET /api/v1/incomes
pub async fn list_incomes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RecordListParams>,
) -> ApiResult<Json<IncomeListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;
    let filter = RecordFilter {
        month: parse_month(params.month.as_deref())?,
        categoria: params.categoria,
    };

    let ingresos = state.datasource.list_incomes(&scope, &filter).await?;

    Ok(Json(IncomeListResponse {
        total: ingresos.len(),
        ingresos,
    }))
}

/// POST /api/v1/incomes
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewIncome>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    validate_record(&req.descripcion, req.monto, &req.categoria)?;
    let scope = user_scope(&req.usuario_id, &headers)?;

    let income = state.datasource.insert_income(&scope, req).await?;

    tracing::info!(income_id = %income.id, monto = income.monto, "Created income");
    Ok((StatusCode::CREATED, Json(income)))
}

/// PUT /api/v1/incomes/:id
pub async fn update_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
    Json(changes): Json<IncomeChanges>,
) -> ApiResult<Json<Income>> {
    validate_changes(changes.monto, changes.descripcion.as_deref())?;
    let scope = user_scope(&params.usuario_id, &headers)?;

    let income = state.datasource.update_income(&scope, &id, changes).await?;
    Ok(Json(income))
}

/// DELETE /api/v1/incomes/:id
pub async fn delete_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    state.datasource.delete_income(&scope, &id).await?;

    tracing::info!(income_id = %id, "Deleted income");
    Ok(StatusCode::NO_CONTENT)
}

/// Shared field checks for income and expense payloads.
pub(crate) fn validate_record(descripcion: &str, monto: f64, categoria: &str) -> ApiResult<()> {
    if descripcion.trim().is_empty() {
        return Err(ApiError::Validation("descripcion cannot be empty".to_string()));
    }
    if !(monto > 0.0) || !monto.is_finite() {
        return Err(ApiError::Validation("monto must be greater than zero".to_string()));
    }
    if categoria.trim().is_empty() {
        return Err(ApiError::Validation("categoria cannot be empty".to_string()));
    }
    Ok(())
}

/// Checks for partial updates.
pub(crate) fn validate_changes(monto: Option<f64>, descripcion: Option<&str>) -> ApiResult<()> {
    if let Some(monto) = monto {
        if !(monto > 0.0) || !monto.is_finite() {
            return Err(ApiError::Validation("monto must be greater than zero".to_string()));
        }
    }
    if let Some(descripcion) = descripcion {
        if descripcion.trim().is_empty() {
            return Err(ApiError::Validation("descripcion cannot be empty".to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record() {
        assert!(validate_record("Salario", 2500.0, "salario").is_ok());
        assert!(validate_record("", 2500.0, "salario").is_err());
        assert!(validate_record("Salario", 0.0, "salario").is_err());
        assert!(validate_record("Salario", -5.0, "salario").is_err());
        assert!(validate_record("Salario", f64::NAN, "salario").is_err());
        assert!(validate_record("Salario", 2500.0, " ").is_err());
    }

    #[test]
    fn test_validate_changes() {
        assert!(validate_changes(None, None).is_ok());
        assert!(validate_changes(Some(10.0), None).is_ok());
        assert!(validate_changes(Some(0.0), None).is_err());
        assert!(validate_changes(None, Some("")).is_err());
    }
}
