//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub supabase: SupabaseSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub datasource: DataSourceSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Supabase project settings
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    #[serde(default = "default_supabase_url")]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_supabase_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            url: default_supabase_url(),
            anon_key: String::new(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl SupabaseSettings {
    /// Convert into the client-facing config type.
    pub fn to_client_config(&self) -> crate::supabase::SupabaseConfig {
        crate::supabase::SupabaseConfig {
            url: self.url.clone(),
            anon_key: self.anon_key.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory with the built dashboard assets, served as a fallback.
    /// None disables static serving.
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
            static_dir: None,
        }
    }
}

/// Which data source implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Remote,
    Mock,
}

/// Data source selection
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceSettings {
    #[serde(default = "default_datasource_mode")]
    pub mode: DataSourceMode,

    /// Seed the mock with demo rows (mock mode only)
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_datasource_mode() -> DataSourceMode {
    DataSourceMode::Remote
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            mode: default_datasource_mode(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("planifica").join("config.toml")),
            Some(PathBuf::from("/etc/planifica/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Supabase overrides
        if let Ok(url) = std::env::var("PLANIFICA_SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Ok(key) = std::env::var("PLANIFICA_SUPABASE_ANON_KEY") {
            self.supabase.anon_key = key;
        }

        // API overrides
        if let Ok(host) = std::env::var("PLANIFICA_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("PLANIFICA_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(dir) = std::env::var("PLANIFICA_STATIC_DIR") {
            self.api.static_dir = Some(dir);
        }

        // Data source overrides
        if let Ok(mode) = std::env::var("PLANIFICA_DATASOURCE") {
            match mode.to_lowercase().as_str() {
                "remote" => self.datasource.mode = DataSourceMode::Remote,
                "mock" => self.datasource.mode = DataSourceMode::Mock,
                other => tracing::warn!("Unknown PLANIFICA_DATASOURCE value: {}", other),
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PLANIFICA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PLANIFICA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase: SupabaseSettings::default(),
            api: ApiSettings::default(),
            datasource: DataSourceSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PlanificaPro Configuration
#
# Environment variables override these settings:
# - PLANIFICA_SUPABASE_URL
# - PLANIFICA_SUPABASE_ANON_KEY
# - PLANIFICA_API_HOST
# - PLANIFICA_API_PORT
# - PLANIFICA_STATIC_DIR
# - PLANIFICA_DATASOURCE (remote | mock)
# - PLANIFICA_LOG_LEVEL
# - PLANIFICA_LOG_FORMAT

[supabase]
# Supabase project URL
url = "http://localhost:54321"

# Anon (publishable) API key
anon_key = ""

# Request timeout (ms)
request_timeout_ms = 10000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 3000

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

# Directory with built dashboard assets (optional)
# static_dir = "planifica-ui/dist"

[datasource]
# remote: Supabase / mock: in-memory offline mode
mode = "remote"

# Seed demo rows when running in mock mode
seed_demo_data = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.datasource.mode, DataSourceMode::Remote);
        assert_eq!(config.supabase.request_timeout_ms, 10_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 3000);
        assert!(config.datasource.seed_demo_data);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [datasource]
            mode = "mock"
            "#,
        )
        .unwrap();
        assert_eq!(config.datasource.mode, DataSourceMode::Mock);
        assert_eq!(config.api.port, 3000);
    }
}
