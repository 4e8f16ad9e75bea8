//! HTTP API Client
//!
//! Functions for communicating with the PlanificaPro REST API. Every
//! function returns `Result<T, String>` with a user-presentable message;
//! pages surface failures as toasts.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api/v1";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("planifica_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IncomeRow {
    pub id: String,
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: String,
    #[serde(default)]
    pub recurrente: bool,
}

#[derive(Debug, Deserialize)]
pub struct IncomeListResponse {
    pub total: usize,
    pub ingresos: Vec<IncomeRow>,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseListResponse {
    pub total: usize,
    pub gastos: Vec<IncomeRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationResult {
    pub cuota_mensual: f64,
    pub total_pagar: f64,
    pub total_intereses: f64,
    pub tasa_mensual: f64,
    #[serde(default)]
    pub tabla: Option<Vec<ScheduleRow>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleRow {
    pub mes: u32,
    pub cuota: f64,
    pub interes: f64,
    pub capital: f64,
    pub saldo: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedSimulation {
    pub id: String,
    pub monto: f64,
    pub plazo_meses: u32,
    pub tasa_anual: f64,
    #[serde(default)]
    pub cuota_mensual: Option<f64>,
    #[serde(default)]
    pub total_pagar: Option<f64>,
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct SimulationListResponse {
    pub total: usize,
    pub simulaciones: Vec<SavedSimulation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub categoria: String,
    pub total: f64,
    pub porcentaje: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub mes: Option<String>,
    pub total_ingresos: f64,
    pub total_gastos: f64,
    pub balance: f64,
    pub tasa_ahorro: f64,
    pub num_ingresos: usize,
    pub num_gastos: usize,
    pub gastos_por_categoria: Vec<CategoryTotal>,
    #[serde(default)]
    pub categoria_dominante: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestionRow {
    pub kind: String,
    pub severity: String,
    pub titulo: String,
    pub detalle: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionListResponse {
    pub total: usize,
    pub sugerencias: Vec<SuggestionRow>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============ Helpers ============

fn with_auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_error(response: Response) -> String {
    response
        .json::<ApiErrorBody>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| "Unknown error".to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(read_error(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn send_get<T: DeserializeOwned>(url: &str, token: Option<&str>) -> Result<T, String> {
    let response = with_auth(Request::get(url), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read_json(response).await
}

async fn send_json<T: DeserializeOwned, B: Serialize>(
    builder: RequestBuilder,
    token: Option<&str>,
    body: &B,
) -> Result<T, String> {
    let response = with_auth(builder, token)
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read_json(response).await
}

async fn send_delete(url: &str, token: Option<&str>) -> Result<(), String> {
    let response = with_auth(Request::delete(url), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if response.ok() {
        Ok(())
    } else {
        Err(read_error(response).await)
    }
}

// ============ Auth ============

/// Sign in with email and password
pub async fn login(email: &str, password: &str) -> Result<SessionResponse, String> {
    #[derive(Serialize)]
    struct LoginRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/auth/login", api_base)),
        None,
        &LoginRequest { email, password },
    )
    .await
}

/// Create an account
pub async fn sign_up(
    email: &str,
    password: &str,
    nombre: &str,
) -> Result<SessionResponse, String> {
    #[derive(Serialize)]
    struct SignUpRequest<'a> {
        email: &'a str,
        password: &'a str,
        nombre: &'a str,
    }

    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/auth/signup", api_base)),
        None,
        &SignUpRequest {
            email,
            password,
            nombre,
        },
    )
    .await
}

// ============ Incomes / Expenses ============

#[derive(Serialize)]
pub struct RecordPayload {
    pub usuario_id: String,
    pub descripcion: String,
    pub monto: f64,
    pub categoria: String,
    pub fecha: String,
    pub recurrente: bool,
}

/// Fetch incomes for a user, optionally scoped to a `YYYY-MM` month
pub async fn fetch_incomes(
    user_id: &str,
    token: Option<&str>,
    month: Option<&str>,
) -> Result<Vec<IncomeRow>, String> {
    let mut url = format!("{}/incomes?usuario_id={}", get_api_base(), user_id);
    if let Some(month) = month {
        url.push_str(&format!("&month={}", month));
    }
    let result: IncomeListResponse = send_get(&url, token).await?;
    Ok(result.ingresos)
}

/// Create an income
pub async fn create_income(
    payload: &RecordPayload,
    token: Option<&str>,
) -> Result<IncomeRow, String> {
    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/incomes", api_base)),
        token,
        payload,
    )
    .await
}

/// Delete an income
pub async fn delete_income(id: &str, user_id: &str, token: Option<&str>) -> Result<(), String> {
    let url = format!(
        "{}/incomes/{}?usuario_id={}",
        get_api_base(),
        id,
        user_id
    );
    send_delete(&url, token).await
}

/// Fetch expenses for a user
pub async fn fetch_expenses(
    user_id: &str,
    token: Option<&str>,
    month: Option<&str>,
) -> Result<Vec<IncomeRow>, String> {
    let mut url = format!("{}/expenses?usuario_id={}", get_api_base(), user_id);
    if let Some(month) = month {
        url.push_str(&format!("&month={}", month));
    }
    let result: ExpenseListResponse = send_get(&url, token).await?;
    Ok(result.gastos)
}

/// Create an expense
pub async fn create_expense(
    payload: &RecordPayload,
    token: Option<&str>,
) -> Result<IncomeRow, String> {
    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/expenses", api_base)),
        token,
        payload,
    )
    .await
}

/// Delete an expense
pub async fn delete_expense(id: &str, user_id: &str, token: Option<&str>) -> Result<(), String> {
    let url = format!(
        "{}/expenses/{}?usuario_id={}",
        get_api_base(),
        id,
        user_id
    );
    send_delete(&url, token).await
}

// ============ Credits ============

/// Run an ephemeral simulation
pub async fn simulate_credit(
    monto: f64,
    tasa_anual: f64,
    plazo_meses: u32,
    incluir_tabla: bool,
) -> Result<SimulationResult, String> {
    #[derive(Serialize)]
    struct SimulateRequest {
        monto: f64,
        tasa_anual: f64,
        plazo_meses: u32,
        incluir_tabla: bool,
    }

    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/credits/simulate", api_base)),
        None,
        &SimulateRequest {
            monto,
            tasa_anual,
            plazo_meses,
            incluir_tabla,
        },
    )
    .await
}

/// Persist a simulation
pub async fn save_simulation(
    user_id: &str,
    monto: f64,
    tasa_anual: f64,
    plazo_meses: u32,
    token: Option<&str>,
) -> Result<SavedSimulation, String> {
    #[derive(Serialize)]
    struct SaveRequest<'a> {
        usuario_id: &'a str,
        monto: f64,
        tasa_anual: f64,
        plazo_meses: u32,
    }

    let api_base = get_api_base();
    send_json(
        Request::post(&format!("{}/credits", api_base)),
        token,
        &SaveRequest {
            usuario_id: user_id,
            monto,
            tasa_anual,
            plazo_meses,
        },
    )
    .await
}

/// Fetch saved simulations
pub async fn fetch_simulations(
    user_id: &str,
    token: Option<&str>,
) -> Result<Vec<SavedSimulation>, String> {
    let url = format!("{}/credits?usuario_id={}", get_api_base(), user_id);
    let result: SimulationListResponse = send_get(&url, token).await?;
    Ok(result.simulaciones)
}

/// Delete a saved simulation
pub async fn delete_simulation(
    id: &str,
    user_id: &str,
    token: Option<&str>,
) -> Result<(), String> {
    let url = format!(
        "{}/credits/{}?usuario_id={}",
        get_api_base(),
        id,
        user_id
    );
    send_delete(&url, token).await
}

// ============ Reports / Suggestions ============

/// Fetch the monthly summary
pub async fn fetch_summary(
    user_id: &str,
    token: Option<&str>,
    month: Option<&str>,
) -> Result<Summary, String> {
    let mut url = format!("{}/reports/summary?usuario_id={}", get_api_base(), user_id);
    if let Some(month) = month {
        url.push_str(&format!("&month={}", month));
    }
    send_get(&url, token).await
}

/// Fetch suggestions
pub async fn fetch_suggestions(
    user_id: &str,
    token: Option<&str>,
    month: Option<&str>,
) -> Result<Vec<SuggestionRow>, String> {
    let mut url = format!("{}/suggestions?usuario_id={}", get_api_base(), user_id);
    if let Some(month) = month {
        url.push_str(&format!("&month={}", month));
    }
    let result: SuggestionListResponse = send_get(&url, token).await?;
    Ok(result.sugerencias)
}
