//! Faculty: `PostgreSQL` stores.
//!
//! Implements the notification sink and the catalog collaborators on top of
//! a shared `sqlx` connection pool. The schema lives in the workspace
//! `migrations/` directory.

pub mod pg_catalog;
pub mod pg_notification_sink;

use faculty_core::error::DomainError;

pub(crate) fn infrastructure(error: sqlx::Error) -> DomainError {
    tracing::error!(%error, "database operation failed");
    DomainError::Infrastructure(error.to_string())
}
