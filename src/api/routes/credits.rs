//! Credit Routes
//!
//! Loan simulation endpoints for the créditos module.
//!
//! - POST /api/v1/credits/simulate - Ephemeral simulation, nothing persisted
//! - GET /api/v1/credits - List saved simulations
//! - POST /api/v1/credits - Compute and persist a simulation
//! - DELETE /api/v1/credits/:id - Delete a saved simulation

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    OwnerParams, SaveSimulationRequest, SimulateRequest, SimulateResponse, SimulationListResponse,
};
use crate::api::error::ApiResult;
use crate::api::routes::user_scope;
use crate::api::state::AppState;
use crate::credit::{self, CreditTerms};
use crate::model::{CreditSimulation, NewCreditSimulation};

/// POST /api/v1/credits/simulate
pub async fn simulate(Json(req): Json<SimulateRequest>) -> ApiResult<Json<SimulateResponse>> {
    let terms = CreditTerms {
        monto: req.monto,
        tasa_anual: req.tasa_anual,
        plazo_meses: req.plazo_meses,
    };

    let resumen = credit::simulate(terms)?;
    let tabla = if req.incluir_tabla {
        Some(credit::schedule(terms)?)
    } else {
        None
    };

    Ok(Json(SimulateResponse { resumen, tabla }))
}

/// GET /api/v1/credits
pub async fn list_simulations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<OwnerParams>,
) -> ApiResult<Json<SimulationListResponse>> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    let simulaciones = state.datasource.list_simulations(&scope).await?;

    Ok(Json(SimulationListResponse {
        total: simulaciones.len(),
        simulaciones,
    }))
}

/// POST /api/v1/credits
///
/// The derived figures are recomputed here; clients only send the terms.
pub async fn save_simulation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveSimulationRequest>,
) -> ApiResult<(StatusCode, Json<CreditSimulation>)> {
    let scope = user_scope(&req.usuario_id, &headers)?;

    let terms = CreditTerms {
        monto: req.monto,
        tasa_anual: req.tasa_anual,
        plazo_meses: req.plazo_meses,
    };
    let resumen = credit::simulate(terms)?;

    let record = NewCreditSimulation {
        usuario_id: scope.user_id.clone(),
        monto: req.monto,
        plazo_meses: req.plazo_meses,
        tasa_anual: req.tasa_anual,
        cuota_mensual: Some(resumen.cuota_mensual),
        total_intereses: Some(resumen.total_intereses),
        total_pagar: Some(resumen.total_pagar),
        estado: req.estado.unwrap_or_else(|| "guardada".to_string()),
    };

    let saved = state.datasource.insert_simulation(&scope, record).await?;

    tracing::info!(simulation_id = %saved.id, monto = saved.monto, "Saved credit simulation");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/v1/credits/:id
pub async fn delete_simulation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let scope = user_scope(&params.usuario_id, &headers)?;

    state.datasource.delete_simulation(&scope, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
