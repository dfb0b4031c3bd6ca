//! Client configuration management
//!
//! This module handles loading configuration from environment variables.
//! The binary reads it once at startup; library users may build `Config`
//! by hand instead.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    CSRF_COOKIE_NAME, CSRF_HEADER_NAME, DEFAULT_API_BASE, DEFAULT_ENVIRONMENT, DEFAULT_RUST_LOG,
};

/// Global client configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub build: BuildConfig,
    pub log: LogConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Absolute base URL, e.g. `http://127.0.0.1:8000/api`
    pub base_url: String,
    pub csrf_header_name: String,
    pub csrf_cookie_name: String,
}

/// Build environment flags
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub environment: String,
    pub use_sentry: bool,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api: ApiConfig::from_env()?,
            build: BuildConfig::from_env()?,
            log: LogConfig::from_env()?,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            csrf_header_name: CSRF_HEADER_NAME.to_string(),
            csrf_cookie_name: CSRF_COOKIE_NAME.to_string(),
        }
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("OJ_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        if base_url.trim().is_empty() {
            return Err(ConfigError::Missing("OJ_API_BASE".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue("OJ_API_BASE".to_string()));
        }

        Ok(Self {
            base_url,
            csrf_header_name: env::var("OJ_CSRF_HEADER")
                .unwrap_or_else(|_| CSRF_HEADER_NAME.to_string()),
            csrf_cookie_name: env::var("OJ_CSRF_COOKIE")
                .unwrap_or_else(|_| CSRF_COOKIE_NAME.to_string()),
        })
    }
}

impl BuildConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: env::var("NODE_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            use_sentry: parse_flag(
                "USE_SENTRY",
                &env::var("USE_SENTRY").unwrap_or_else(|_| "0".to_string()),
            )?,
        })
    }
}

impl LogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let json = match env::var("LOG_FORMAT") {
            Ok(format) if format.eq_ignore_ascii_case("json") => true,
            Ok(format) if format.is_empty() || format.eq_ignore_ascii_case("text") => false,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            Err(_) => false,
        };
        Ok(Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            json,
        })
    }
}

/// Parse a `0`/`1`/`true`/`false` toggle
fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
