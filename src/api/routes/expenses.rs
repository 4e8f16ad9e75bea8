//! Expense Routes
//!
//! CRUD endpoints for the gastos module, mirroring the income routes.
//!
//! - GET /api/v1/expenses
//! - POST /api/v1/expenses
//! - PUT /api/v1/expenses/:id
//! - DELETE /api/v1/expenses/:id

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ExpenseListResponse, OwnerParams, RecordListParams};
use crate::api::error::ApiResult;
use crate::api::routes::incomes::{validate_changes, validate_record};
use crate::api::routes::{parse_month, user_scope};
use crate::api::state::AppState;
use crate::model::{Expense, ExpenseChanges, NewExpense, RecordFilter};

/// GET /api/v1/expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RecordListParams>,
) -> ApiResult<Json<ExpenseListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;
    let filter = RecordFilter {
        month: parse_month(params.month.as_deref())?,
        categoria: params.categoria,
    };

    let gastos = state.datasource.list_expenses(&scope, &filter).await?;

    Ok(Json(ExpenseListResponse {
        total: gastos.len(),
        gastos,
    }))
}

/// POST /api/v1/expenses
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    validate_record(&req.descripcion, req.monto, &req.categoria)?;
    let scope = user_scope(&req.usuario_id, &headers)?;

    let expense = state.datasource.insert_expense(&scope, req).await?;

    tracing::info!(expense_id = %expense.id, monto = expense.monto, "Created expense");
    Ok((StatusCode::CREATED, Json(expense)))
}

/// PUT /api/v1/expenses/:id
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
    Json(changes): Json<ExpenseChanges>,
) -> ApiResult<Json<Expense>> {
    validate_changes(changes.monto, changes.descripcion.as_deref())?;
    let scope = user_scope(&params.usuario_id, &headers)?;

    let expense = state.datasource.update_expense(&scope, &id, changes).await?;
    Ok(Json(expense))
}

/// DELETE /api/v1/expenses/:id
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    state.datasource.delete_expense(&scope, &id).await?;

    tracing::info!(expense_id = %id, "Deleted expense");
    Ok(StatusCode::NO_CONTENT)
}
