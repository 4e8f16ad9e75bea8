//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON. Row payloads
//! reuse the model types directly since they already mirror the wire shape.

use serde::{Deserialize, Serialize};

use crate::credit::{CreditSummary, ScheduleRow};
use crate::model::{CreditSimulation, Expense, FinancialGoal, Income, SavedCategory};
use crate::suggestions::Suggestion;

// ============================================
// AUTH DTOs
// ============================================

/// Sign-up request
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub nombre: Option<String>,
}

/// Password login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ============================================
// RECORD DTOs (ingresos / gastos)
// ============================================

/// Query parameters for list endpoints
#[derive(Debug, Deserialize)]
pub struct RecordListParams {
    pub usuario_id: String,
    /// Month filter, `YYYY-MM`
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

/// Query parameters for update/delete endpoints
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    pub usuario_id: String,
}

/// Income list response
#[derive(Debug, Serialize)]
pub struct IncomeListResponse {
    pub total: usize,
    pub ingresos: Vec<Income>,
}

/// Expense list response
#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub total: usize,
    pub gastos: Vec<Expense>,
}

// ============================================
// CREDIT DTOs
// ============================================

/// Ephemeral simulation request
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub monto: f64,
    pub tasa_anual: f64,
    pub plazo_meses: u32,
    /// Include the month-by-month amortization table
    #[serde(default)]
    pub incluir_tabla: bool,
}

/// Simulation response
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    #[serde(flatten)]
    pub resumen: CreditSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabla: Option<Vec<ScheduleRow>>,
}

/// Persist-a-simulation request. The derived figures are computed
/// server-side, never trusted from the client.
#[derive(Debug, Deserialize)]
pub struct SaveSimulationRequest {
    pub usuario_id: String,
    pub monto: f64,
    pub tasa_anual: f64,
    pub plazo_meses: u32,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Saved simulation list response
#[derive(Debug, Serialize)]
pub struct SimulationListResponse {
    pub total: usize,
    pub simulaciones: Vec<CreditSimulation>,
}

// ============================================
// CATEGORY / GOAL DTOs
// ============================================

/// Category list response
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub total: usize,
    pub categorias: Vec<SavedCategory>,
}

/// Goal list response
#[derive(Debug, Serialize)]
pub struct GoalListResponse {
    pub total: usize,
    pub metas: Vec<FinancialGoal>,
}

// ============================================
// REPORT / SUGGESTION DTOs
// ============================================

/// Query parameters for reports and suggestions
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub usuario_id: String,
    /// Month scope, `YYYY-MM`; absent = all time
    #[serde(default)]
    pub month: Option<String>,
}

/// Suggestion list response
#[derive(Debug, Serialize)]
pub struct SuggestionListResponse {
    pub total: usize,
    pub sugerencias: Vec<Suggestion>,
}

// ============================================
// SYSTEM DTOs
// ============================================

/// Diagnostic response shared by ping and env-check
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub datasource: String,
    pub datasource_status: String,
    pub uptime_seconds: u64,
    pub version: String,
}
