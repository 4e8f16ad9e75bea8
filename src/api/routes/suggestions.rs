//! Suggestion Routes
//!
//! - GET /api/v1/suggestions - Rule-based spending advice

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SuggestionListResponse, SummaryParams};
use crate::api::error::ApiResult;
use crate::api::routes::{parse_month, user_scope};
use crate::api::state::AppState;
use crate::model::RecordFilter;
use crate::reports::monthly_summary;
use crate::suggestions::evaluate;

/// GET /api/v1/suggestions
pub async fn list_suggestions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<SuggestionListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;
    let month = parse_month(params.month.as_deref())?;

    let filter = RecordFilter {
        month,
        categoria: None,
    };

    let incomes = state.datasource.list_incomes(&scope, &filter).await?;
    let expenses = state.datasource.list_expenses(&scope, &filter).await?;
    let goals = state.datasource.list_goals(&scope).await?;

    let summary = monthly_summary(month, &incomes, &expenses);
    let sugerencias = evaluate(&summary, &goals);

    Ok(Json(SuggestionListResponse {
        total: sugerencias.len(),
        sugerencias,
    }))
}
