//! Reserva Core Library
//!
//! This crate provides the foundational types shared by the Reserva
//! cache key registry and the tools built around it:
//!
//! - Unified error handling with error codes and status mapping
//! - Application configuration (cache overrides and logging)

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
