//! `PostgreSQL` implementation of the `NotificationSink` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use faculty_core::error::DomainError;
use faculty_core::notification::Notification;
use faculty_core::repository::NotificationSink;

use crate::infrastructure;

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: i64,
    recipient_id: i64,
    title: String,
    message: String,
    category: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification::restore(
            row.id,
            row.recipient_id,
            row.title,
            row.message,
            row.category.parse()?,
            row.is_read,
            row.created_at,
        ))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, recipient_id, title, message, category, is_read, created_at FROM notifications";

/// PostgreSQL-backed notification sink.
#[derive(Debug, Clone)]
pub struct PgNotificationSink {
    pool: PgPool,
}

impl PgNotificationSink {
    /// Creates a new `PgNotificationSink`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, query: &str, user_id: i64) -> Result<Vec<Notification>, DomainError> {
        let rows = sqlx::query_as::<_, NotificationRow>(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        rows.into_iter().map(Notification::try_from).collect()
    }
}

#[async_trait]
impl NotificationSink for PgNotificationSink {
    async fn create(&self, notification: Notification) -> Result<Notification, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO notifications (recipient_id, title, message, category, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(notification.recipient_id())
        .bind(notification.title())
        .bind(notification.message())
        .bind(notification.category().as_str())
        .bind(notification.is_read())
        .bind(notification.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure)?;

        debug!(notification_id = id, "notification inserted");
        Ok(notification.with_id(id))
    }

    async fn fetch_by_user(&self, user_id: i64) -> Result<Vec<Notification>, DomainError> {
        self.fetch(
            &format!("{SELECT_COLUMNS} WHERE recipient_id = $1 ORDER BY created_at DESC, id DESC"),
            user_id,
        )
        .await
    }

    async fn fetch_unread(&self, user_id: i64) -> Result<Vec<Notification>, DomainError> {
        self.fetch(
            &format!(
                "{SELECT_COLUMNS} WHERE recipient_id = $1 AND is_read = FALSE \
                 ORDER BY created_at DESC, id DESC"
            ),
            user_id,
        )
        .await
    }

    async fn mark_read(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected() > 0)
    }
}
