//! # PlanificaPro
//!
//! A full-stack Rust personal finance dashboard backed by Supabase.
//!
//! ## Features
//!
//! - **Income and expense tracking**: per-user CRUD with month and
//!   category filters
//! - **Credit simulation**: amortization math with an optional
//!   month-by-month schedule
//! - **Monthly reports**: totals, balance, savings rate, category breakdown
//! - **Spending suggestions**: deterministic rule-based advice
//! - **Offline mode**: in-memory data source selected by configuration
//!
//! ## Modules
//!
//! - [`supabase`]: typed PostgREST and GoTrue clients
//! - [`datasource`]: the persistence seam (remote or mock)
//! - [`credit`]: loan amortization math
//! - [`reports`] / [`suggestions`]: aggregation and advice
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use planifica::api::{serve, ApiConfig, AppState};
//! use planifica::datasource::MockDataSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let datasource = Arc::new(MockDataSource::with_demo_data());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(datasource, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod credit;
pub mod datasource;
pub mod model;
pub mod reports;
pub mod suggestions;
pub mod supabase;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, DataSourceMode};

pub use credit::{schedule, simulate, CreditError, CreditSummary, CreditTerms, ScheduleRow};

pub use datasource::{
    DataSource, DataSourceError, MockDataSource, RemoteDataSource, UserScope,
};

pub use model::{
    CreditSimulation, Expense, FinancialGoal, Income, Month, RecordFilter, SavedCategory,
};

pub use reports::{monthly_summary, CategoryTotal, MonthlySummary};

pub use suggestions::{evaluate, Severity, Suggestion, SuggestionKind};

pub use supabase::{AuthApi, Session, SupabaseClient, SupabaseConfig, SupabaseError, TableQuery};
