//! Report Routes
//!
//! - GET /api/v1/reports/summary - Monthly totals and category breakdown

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::api::dto::SummaryParams;
use crate::api::error::ApiResult;
use crate::api::routes::{parse_month, user_scope};
use crate::api::state::AppState;
use crate::model::RecordFilter;
use crate::reports::{monthly_summary, MonthlySummary};

/// GET /api/v1/reports/summary
pub async fn summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<MonthlySummary>> {
    let scope = user_scope(&params.usuario_id, &headers)?;
    let month = parse_month(params.month.as_deref())?;

    let filter = RecordFilter {
        month,
        categoria: None,
    };

    let incomes = state.datasource.list_incomes(&scope, &filter).await?;
    let expenses = state.datasource.list_expenses(&scope, &filter).await?;

    Ok(Json(monthly_summary(month, &incomes, &expenses)))
}
