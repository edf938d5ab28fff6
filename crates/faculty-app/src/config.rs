//! Environment configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be `json` or `pretty`, got `{other}`"
            ))),
        }
    }
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Upper bound of the connection pool.
    pub database_max_connections: u32,
    /// Tracing output format.
    pub log_format: LogFormat,
    /// Per-listener dispatch limit; `None` lets listeners run unbounded.
    pub listener_timeout: Option<Duration>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is unset or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is unset or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable must be set".into())
            })?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) | Err(_) => {
                    return Err(AppError::Config(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got `{raw}`"
                    )));
                }
                Ok(n) => n,
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_format = lookup("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        let listener_timeout = lookup("LISTENER_TIMEOUT_MS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| {
                        AppError::Config(format!("LISTENER_TIMEOUT_MS must be milliseconds: {e}"))
                    })
            })
            .transpose()?;

        Ok(Self {
            database_url,
            database_max_connections,
            log_format,
            listener_timeout,
        })
    }
}
