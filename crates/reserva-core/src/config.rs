//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub cache: CacheConfig,

    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Cache registry overrides
///
/// Keys are category names such as `room_photos`. Names are checked against
/// the registry when it is built, not here.
#[derive(Debug, Deserialize, Clone, Default, Validate)]
pub struct CacheConfig {
    /// TTL in seconds per category name
    #[serde(default)]
    #[validate(custom(function = "validate_ttl_overrides"))]
    pub ttl_overrides: HashMap<String, u64>,

    /// Priority name (`high`, `medium`, `low`) per category name
    #[serde(default)]
    pub priority_overrides: HashMap<String, String>,
}

fn validate_ttl_overrides(overrides: &HashMap<String, u64>) -> Result<(), ValidationError> {
    if overrides.values().any(|ttl| *ttl == 0) {
        let mut err = ValidationError::new("ttl_must_be_positive");
        err.message = Some("TTL overrides must be greater than zero".into());
        return Err(err);
    }
    Ok(())
}

/// Log output format
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1, message = "Log level must not be empty"))]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> Result<Self, AppError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with RESERVA_ prefix
            .add_source(
                Environment::with_prefix("RESERVA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Load configuration from a specific file, still honouring `RESERVA__*`
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let config = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("RESERVA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Load configuration from an inline TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, AppError> {
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;

        tracing::debug!(
            ttl_overrides = app.cache.ttl_overrides.len(),
            priority_overrides = app.cache.priority_overrides.len(),
            "Configuration loaded"
        );
        Ok(app)
    }
}
