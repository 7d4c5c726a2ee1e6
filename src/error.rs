//! Unified error handling for the teambase application.
//!
//! This module provides a centralized error type (`AppError`) that handles
//! all errors throughout the application and maps them to appropriate HTTP
//! responses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::launcher::LauncherError;

/// Unified application error type.
///
/// All errors in the application are converted to this type, which implements
/// `actix_web::ResponseError` for automatic HTTP response generation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database errors from SQLx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration errors from SQLx
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server process management errors
    #[error("Launcher error: {0}")]
    Launcher(#[from] LauncherError),

    /// Password hashing or verification failures
    #[error("Password hash error: {0}")]
    Hash(String),

    /// Unauthorized access errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflicts with existing state, e.g. an already-registered email
    #[error("Conflict: {0}")]
    Conflict(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_)
            | AppError::Migrate(_)
            | AppError::Config(_)
            | AppError::Launcher(_)
            | AppError::Hash(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_message = match self {
            // Don't expose internal details in responses
            AppError::Database(_) | AppError::Migrate(_) | AppError::Io(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Launcher(_) => "Process management error".to_string(),
            AppError::Hash(_) => "Credential processing error".to_string(),
            // For these errors, expose the message
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": error_message
        });

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Hash(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
