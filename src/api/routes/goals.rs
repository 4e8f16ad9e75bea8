//! Goal Routes
//!
//! Savings goals (metas financieras).
//!
//! - GET /api/v1/goals
//! - POST /api/v1/goals
//! - PUT /api/v1/goals/:id
//! - DELETE /api/v1/goals/:id

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{GoalListResponse, OwnerParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::user_scope;
use crate::api::state::AppState;
use crate::model::{FinancialGoal, GoalChanges, NewGoal};

/// GET /api/v1/goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<OwnerParams>,
) -> ApiResult<Json<GoalListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    let metas = state.datasource.list_goals(&scope).await?;

    Ok(Json(GoalListResponse {
        total: metas.len(),
        metas,
    }))
}

/// POST /api/v1/goals
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<FinancialGoal>)> {
    if req.nombre.trim().is_empty() {
        return Err(ApiError::Validation("nombre cannot be empty".to_string()));
    }
    if !(req.monto_objetivo > 0.0) || !req.monto_objetivo.is_finite() {
        return Err(ApiError::Validation(
            "monto_objetivo must be greater than zero".to_string(),
        ));
    }
    if req.monto_actual < 0.0 {
        return Err(ApiError::Validation(
            "monto_actual cannot be negative".to_string(),
        ));
    }
    let scope = user_scope(&req.usuario_id, &headers)?;

    let goal = state.datasource.insert_goal(&scope, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /api/v1/goals/:id
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
    Json(changes): Json<GoalChanges>,
) -> ApiResult<Json<FinancialGoal>> {
    if let Some(objetivo) = changes.monto_objetivo {
        if !(objetivo > 0.0) || !objetivo.is_finite() {
            return Err(ApiError::Validation(
                "monto_objetivo must be greater than zero".to_string(),
            ));
        }
    }
    let scope = user_scope(&params.usuario_id, &headers)?;

    let goal = state.datasource.update_goal(&scope, &id, changes).await?;
    Ok(Json(goal))
}

/// DELETE /api/v1/goals/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    state.datasource.delete_goal(&scope, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
