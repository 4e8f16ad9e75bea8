//! PlanificaPro REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/v1/auth/signup` - Create an account
//! - `POST /api/v1/auth/login` - Password sign-in
//! - `POST /api/v1/auth/refresh` - Exchange a refresh token
//!
//! ## Incomes / Expenses
//! - `GET /api/v1/incomes` - List (user, month, category filters)
//! - `POST /api/v1/incomes` - Create
//! - `PUT /api/v1/incomes/:id` - Update
//! - `DELETE /api/v1/incomes/:id` - Delete
//! - Same shape under `/api/v1/expenses`
//!
//! ## Credits
//! - `POST /api/v1/credits/simulate` - Ephemeral simulation
//! - `GET /api/v1/credits` - List saved simulations
//! - `POST /api/v1/credits` - Compute and persist
//! - `DELETE /api/v1/credits/:id` - Delete
//!
//! ## Categories / Goals
//! - `GET|POST /api/v1/categories`, `DELETE /api/v1/categories/:id`
//! - `GET|POST /api/v1/goals`, `PUT|DELETE /api/v1/goals/:id`
//!
//! ## Reports / Suggestions
//! - `GET /api/v1/reports/summary` - Monthly totals and breakdown
//! - `GET /api/v1/suggestions` - Rule-based advice
//!
//! ## Diagnostics
//! - `GET /api/v1/ping`, `GET /api/v1/env-check`
//! - `GET /health/live`, `GET /health/ready`, `GET /health`
//!
//! The built dashboard is served as a static fallback when
//! `static_dir` is configured.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState, EnvStatus};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let api_routes = Router::new()
        // Auth routes
        .route("/auth/signup", post(routes::auth::sign_up))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        // Income routes
        .route("/incomes", get(routes::incomes::list_incomes))
        .route("/incomes", post(routes::incomes::create_income))
        .route("/incomes/:id", put(routes::incomes::update_income))
        .route("/incomes/:id", delete(routes::incomes::delete_income))
        // Expense routes
        .route("/expenses", get(routes::expenses::list_expenses))
        .route("/expenses", post(routes::expenses::create_expense))
        .route("/expenses/:id", put(routes::expenses::update_expense))
        .route("/expenses/:id", delete(routes::expenses::delete_expense))
        // Credit routes
        .route("/credits/simulate", post(routes::credits::simulate))
        .route("/credits", get(routes::credits::list_simulations))
        .route("/credits", post(routes::credits::save_simulation))
        .route("/credits/:id", delete(routes::credits::delete_simulation))
        // Category routes
        .route("/categories", get(routes::categories::list_categories))
        .route("/categories", post(routes::categories::create_category))
        .route("/categories/:id", delete(routes::categories::delete_category))
        // Goal routes
        .route("/goals", get(routes::goals::list_goals))
        .route("/goals", post(routes::goals::create_goal))
        .route("/goals/:id", put(routes::goals::update_goal))
        .route("/goals/:id", delete(routes::goals::delete_goal))
        // Report and suggestion routes
        .route("/reports/summary", get(routes::reports::summary))
        .route("/suggestions", get(routes::suggestions::list_suggestions))
        // Diagnostics
        .route("/ping", get(routes::system::ping))
        .route("/env-check", get(routes::system::env_check));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state);

    // Serve the built dashboard when configured
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("PlanificaPro API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("PlanificaPro API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockDataSource;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let datasource = Arc::new(MockDataSource::new());
        let state = AppState::new(datasource, ApiConfig::default());
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let response = app.oneshot(get_request("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();
        let response = app.oneshot(get_request("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["datasource"], "mock");
    }

    #[tokio::test]
    async fn test_ping() {
        let app = create_test_app();
        let response = app.oneshot(get_request("/api/v1/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({"email": "demo@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["access_token"].is_string());
        assert!(body["user"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_payload() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({"email": "not-an-email", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_income_create_then_list_roundtrip() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/incomes",
                json!({
                    "usuario_id": "u-1",
                    "descripcion": "Salario",
                    "monto": 2500.0,
                    "categoria": "salario",
                    "fecha": "2025-03-01",
                    "recurrente": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["monto"], 2500.0);

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/incomes?usuario_id=u-1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["ingresos"][0]["id"], created["id"]);

        // Another user never sees the row
        let response = app
            .oneshot(get_request("/api/v1/incomes?usuario_id=u-2"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["total"], 0);
    }

    #[tokio::test]
    async fn test_income_rejects_invalid_amount() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/incomes",
                json!({
                    "usuario_id": "u-1",
                    "descripcion": "Salario",
                    "monto": -5.0,
                    "categoria": "salario",
                    "fecha": "2025-03-01"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_income_list_rejects_bad_month() {
        let app = create_test_app();
        let response = app
            .oneshot(get_request("/api/v1/incomes?usuario_id=u-1&month=bogus"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/incomes")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_credit_simulation_values() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/credits/simulate",
                json!({"monto": 15000.0, "tasa_anual": 18.5, "plazo_meses": 24}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let cuota = body["cuota_mensual"].as_f64().unwrap();
        assert!((cuota - 747.07).abs() < 0.01, "cuota was {}", cuota);
        assert!(body.get("tabla").is_none());
    }

    #[tokio::test]
    async fn test_credit_simulation_with_schedule() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/credits/simulate",
                json!({
                    "monto": 1200.0,
                    "tasa_anual": 0.0,
                    "plazo_meses": 12,
                    "incluir_tabla": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["cuota_mensual"], 100.0);
        assert_eq!(body["tabla"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_credit_simulation_rejects_bad_terms() {
        let app = create_test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/credits/simulate",
                json!({"monto": 0.0, "tasa_anual": 18.5, "plazo_meses": 24}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_save_simulation_computes_derived_columns() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/credits",
                json!({
                    "usuario_id": "u-1",
                    "monto": 15000.0,
                    "tasa_anual": 18.5,
                    "plazo_meses": 24
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let saved = body_json(response).await;
        let cuota = saved["cuota_mensual"].as_f64().unwrap();
        assert!((cuota - 747.07).abs() < 0.01);

        let response = app
            .oneshot(get_request("/api/v1/credits?usuario_id=u-1"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["total"], 1);
    }

    #[tokio::test]
    async fn test_report_summary() {
        let app = create_test_app();

        for (uri, body) in [
            (
                "/api/v1/incomes",
                json!({
                    "usuario_id": "u-1",
                    "descripcion": "Salario",
                    "monto": 2000.0,
                    "categoria": "salario",
                    "fecha": "2025-03-01"
                }),
            ),
            (
                "/api/v1/expenses",
                json!({
                    "usuario_id": "u-1",
                    "descripcion": "Alquiler",
                    "monto": 800.0,
                    "categoria": "vivienda",
                    "fecha": "2025-03-02"
                }),
            ),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", uri, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(get_request(
                "/api/v1/reports/summary?usuario_id=u-1&month=2025-03",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["mes"], "2025-03");
        assert_eq!(body["total_ingresos"], 2000.0);
        assert_eq!(body["total_gastos"], 800.0);
        assert_eq!(body["balance"], 1200.0);
        assert_eq!(body["categoria_dominante"], "vivienda");
    }

    #[tokio::test]
    async fn test_suggestions_endpoint() {
        let app = create_test_app();
        let response = app
            .oneshot(get_request("/api/v1/suggestions?usuario_id=u-1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        // Empty account: at least the "no movements" nudge
        assert!(body["total"].as_u64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_test_app();
        let response = app
            .oneshot(get_request("/api/v1/does-not-exist"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
