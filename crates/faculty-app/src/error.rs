//! Faculty: startup error types.

use thiserror::Error;

/// Errors raised while configuring and starting the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The global tracing subscriber could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}
