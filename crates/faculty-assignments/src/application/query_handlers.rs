//! Query handlers for an instructor's notification inbox.

use chrono::{DateTime, Utc};
use faculty_core::error::DomainError;
use faculty_core::notification::{Notification, NotificationCategory};
use faculty_core::repository::NotificationSink;
use serde::Serialize;

/// Read-only view of a stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    /// Sink-assigned identity.
    pub id: Option<i64>,
    /// The user the notification is addressed to.
    pub recipient_id: i64,
    /// Short title.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Visual category.
    pub category: NotificationCategory,
    /// Whether the user has read it.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id(),
            recipient_id: notification.recipient_id(),
            title: notification.title().to_owned(),
            message: notification.message().to_owned(),
            category: notification.category(),
            read: notification.is_read(),
            created_at: notification.created_at(),
        }
    }
}

/// Lists every notification addressed to `user_id`, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the sink cannot be read.
pub async fn list_notifications(
    user_id: i64,
    sink: &dyn NotificationSink,
) -> Result<Vec<NotificationView>, DomainError> {
    let notifications = sink.fetch_by_user(user_id).await?;
    Ok(notifications.iter().map(NotificationView::from).collect())
}

/// Lists the unread notifications addressed to `user_id`, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the sink cannot be read.
pub async fn list_unread_notifications(
    user_id: i64,
    sink: &dyn NotificationSink,
) -> Result<Vec<NotificationView>, DomainError> {
    let notifications = sink.fetch_unread(user_id).await?;
    Ok(notifications.iter().map(NotificationView::from).collect())
}

/// Counts the unread notifications addressed to `user_id`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the sink cannot be read.
pub async fn count_unread_notifications(
    user_id: i64,
    sink: &dyn NotificationSink,
) -> Result<usize, DomainError> {
    Ok(sink.fetch_unread(user_id).await?.len())
}
