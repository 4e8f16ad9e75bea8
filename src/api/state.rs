//! Application State
//!
//! Shared state accessible by all API handlers. This is the explicit
//! application context: the data source, server configuration and startup
//! info travel together instead of living in globals.

use crate::datasource::DataSource;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Data source (Supabase or mock) selected at startup
    pub datasource: Arc<dyn DataSource>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Environment summary for the env-check endpoint
    pub env: EnvStatus,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(datasource: Arc<dyn DataSource>, config: ApiConfig) -> Self {
        Self {
            datasource,
            config: Arc::new(config),
            env: EnvStatus::default(),
            start_time: Instant::now(),
        }
    }

    pub fn with_env(datasource: Arc<dyn DataSource>, config: ApiConfig, env: EnvStatus) -> Self {
        Self {
            datasource,
            config: Arc::new(config),
            env,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins (empty = permissive)
    pub cors_origins: Vec<String>,
    /// Directory with built dashboard assets, served as router fallback
    pub static_dir: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            static_dir: None,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// What the deployment environment looks like, for diagnostics.
#[derive(Debug, Clone)]
pub struct EnvStatus {
    pub supabase_url_set: bool,
    pub supabase_key_set: bool,
    /// "supabase" or "mock"
    pub datasource_mode: String,
}

impl Default for EnvStatus {
    fn default() -> Self {
        Self {
            supabase_url_set: false,
            supabase_key_set: false,
            datasource_mode: "mock".to_string(),
        }
    }
}
