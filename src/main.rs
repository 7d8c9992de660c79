//! Reserva cache key table
//!
//! Loads configuration (from the file given as the first argument, or from
//! `config/` and the environment otherwise), builds the key naming registry
//! with any overrides and prints the resulting category table as JSON.
//! Deployments run it to check what keys, patterns and TTLs the API will use.

use anyhow::Context;
use reserva_cache::KeyNamingRegistry;
use reserva_core::config::{LogFormat, LoggingConfig};
use reserva_core::AppConfig;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "reserva_keys={},reserva_cache={},reserva_core={}",
            logging.level, logging.level, logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    init_tracing(&config.logging);

    info!(
        "Starting Reserva cache key table v{}",
        env!("CARGO_PKG_VERSION")
    );

    let registry =
        KeyNamingRegistry::from_config(&config.cache).context("invalid cache configuration")?;
    let table = registry.describe_json()?;

    info!(
        categories = registry.categories().count(),
        "Registry validated"
    );

    println!("{}", table);
    Ok(())
}
