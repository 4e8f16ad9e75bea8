//! Category Routes
//!
//! User-defined categories shared by the ingresos and gastos forms.
//!
//! - GET /api/v1/categories
//! - POST /api/v1/categories
//! - DELETE /api/v1/categories/:id

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CategoryListResponse, OwnerParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::user_scope;
use crate::api::state::AppState;
use crate::model::{NewCategory, SavedCategory};

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<OwnerParams>,
) -> ApiResult<Json<CategoryListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    let categorias = state.datasource.list_categories(&scope).await?;

    Ok(Json(CategoryListResponse {
        total: categorias.len(),
        categorias,
    }))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<SavedCategory>)> {
    if req.nombre.trim().is_empty() {
        return Err(ApiError::Validation("nombre cannot be empty".to_string()));
    }
    if req.tipo != "ingreso" && req.tipo != "gasto" {
        return Err(ApiError::Validation(
            "tipo must be 'ingreso' or 'gasto'".to_string(),
        ));
    }
    let scope = user_scope(&req.usuario_id, &headers)?;

    let category = state.datasource.insert_category(&scope, req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/v1/categories/:id
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    state.datasource.delete_category(&scope, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
