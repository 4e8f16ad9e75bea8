//! PlanificaPro API Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from config.toml (or the user config directory) with
//! environment overrides:
//! - `PLANIFICA_SUPABASE_URL`: Supabase project URL
//! - `PLANIFICA_SUPABASE_ANON_KEY`: anon API key
//! - `PLANIFICA_API_HOST` / `PLANIFICA_API_PORT`: bind address (default 0.0.0.0:3000)
//! - `PLANIFICA_STATIC_DIR`: built dashboard assets to serve
//! - `PLANIFICA_DATASOURCE`: `remote` (Supabase) or `mock` (offline)
//! - `PLANIFICA_LOG_LEVEL` / `PLANIFICA_LOG_FORMAT`: logging
//! - `RUST_LOG`: overrides the log filter entirely

use std::sync::Arc;

use planifica::api::{serve, ApiConfig, AppState, EnvStatus};
use planifica::config::{Config, DataSourceMode};
use planifica::datasource::{DataSource, MockDataSource, RemoteDataSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so logging settings apply from the start
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!("Starting PlanificaPro API server v{}", env!("CARGO_PKG_VERSION"));

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        cors_origins: config.api.cors_origins.clone(),
        static_dir: config.api.static_dir.clone(),
    };

    // Select the data source once, here, by configuration
    let datasource: Arc<dyn DataSource> = match config.datasource.mode {
        DataSourceMode::Remote => {
            tracing::info!("Data source: Supabase at {}", config.supabase.url);
            if config.supabase.anon_key.is_empty() {
                tracing::warn!("Supabase anon key is empty, requests will be rejected");
            }

            let remote = RemoteDataSource::new(config.supabase.to_client_config());
            match remote.health_check().await {
                Ok(()) => tracing::info!("Supabase connection verified"),
                Err(e) => tracing::warn!("Supabase not reachable: {} (requests may fail)", e),
            }
            Arc::new(remote)
        }
        DataSourceMode::Mock => {
            tracing::info!("Data source: mock (offline mode)");
            if config.datasource.seed_demo_data {
                Arc::new(MockDataSource::with_demo_data())
            } else {
                Arc::new(MockDataSource::new())
            }
        }
    };

    let env = EnvStatus {
        supabase_url_set: !config.supabase.url.is_empty(),
        supabase_key_set: !config.supabase.anon_key.is_empty(),
        datasource_mode: datasource.name().to_string(),
    };

    let state = AppState::with_env(datasource, api_config.clone(), env);

    if let Some(dir) = &api_config.static_dir {
        tracing::info!("Serving dashboard assets from {}", dir);
    }

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("PlanificaPro API server stopped");
    Ok(())
}

/// Initialize tracing from config, honoring RUST_LOG when set
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("planifica={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
