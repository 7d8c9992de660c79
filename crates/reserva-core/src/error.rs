//! Unified error handling for Reserva
//!
//! Every failure the registry can report is local and synchronous. Callers
//! treat them as programming errors, so most map to a 500-class status.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Registry Errors ====================
    #[error("Invalid attribute for {category}: {reason}")]
    InvalidAttribute { category: String, reason: String },

    #[error("Unknown cache category: {0}")]
    UnknownCategory(String),

    #[error("Invalid key pattern: {0}")]
    InvalidPattern(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Shorthand for an attribute failure on a named category
    pub fn invalid_attribute(category: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidAttribute {
            category: category.into(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status code a calling service should surface
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AppError::Validation(_) => 400,

            // 500 Internal Server Error
            _ => 500,
        }
    }

    /// Returns the error code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidAttribute { .. } => "invalid_attribute",
            AppError::UnknownCategory(_) => "unknown_category",
            AppError::InvalidPattern(_) => "invalid_pattern",
            AppError::Validation(_) => "validation_error",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
