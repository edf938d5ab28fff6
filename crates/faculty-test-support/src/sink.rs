//! Test sinks: `NotificationSink` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use faculty_core::error::DomainError;
use faculty_core::notification::Notification;
use faculty_core::repository::NotificationSink;

/// A fully functional in-memory notification sink. Assigns identities from 1
/// upwards, never reusing one after a delete, and keeps every created record
/// so tests can inspect them.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    records: Mutex<Vec<Notification>>,
    last_id: AtomicI64,
}

impl InMemoryNotificationSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored record, in creation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn created(&self) -> Vec<Notification> {
        self.records.lock().unwrap().clone()
    }

    fn newest_first(mut records: Vec<Notification>) -> Vec<Notification> {
        records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        records
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn create(&self, notification: Notification) -> Result<Notification, DomainError> {
        let mut records = self.records.lock().unwrap();
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = notification.with_id(id);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_by_user(&self, user_id: i64) -> Result<Vec<Notification>, DomainError> {
        let records = self.records.lock().unwrap();
        let matching = records
            .iter()
            .filter(|n| n.recipient_id() == user_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn fetch_unread(&self, user_id: i64) -> Result<Vec<Notification>, DomainError> {
        let records = self.records.lock().unwrap();
        let matching = records
            .iter()
            .filter(|n| n.recipient_id() == user_id && !n.is_read())
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn mark_read(&self, id: i64) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|n| n.id() == Some(id)) {
            Some(notification) => {
                notification.mark_read();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: i64) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        let mut touched = false;
        for notification in records.iter_mut().filter(|n| n.recipient_id() == user_id) {
            notification.mark_read();
            touched = true;
        }
        Ok(touched)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|n| n.id() != Some(id));
        Ok(records.len() != before)
    }
}

/// A sink that always returns an infrastructure error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingNotificationSink;

fn connection_refused<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

#[async_trait]
impl NotificationSink for FailingNotificationSink {
    async fn create(&self, _notification: Notification) -> Result<Notification, DomainError> {
        connection_refused()
    }

    async fn fetch_by_user(&self, _user_id: i64) -> Result<Vec<Notification>, DomainError> {
        connection_refused()
    }

    async fn fetch_unread(&self, _user_id: i64) -> Result<Vec<Notification>, DomainError> {
        connection_refused()
    }

    async fn mark_read(&self, _id: i64) -> Result<bool, DomainError> {
        connection_refused()
    }

    async fn mark_all_read(&self, _user_id: i64) -> Result<bool, DomainError> {
        connection_refused()
    }

    async fn delete(&self, _id: i64) -> Result<bool, DomainError> {
        connection_refused()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use faculty_core::notification::{Notification, NotificationCategory};
    use faculty_core::repository::NotificationSink;

    use super::InMemoryNotificationSink;
    use crate::FixedClock;

    fn notification(title: &str) -> Notification {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        Notification::new(5, title, "body", NotificationCategory::Informational, &clock)
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        // Arrange
        let sink = InMemoryNotificationSink::new();
        let first = sink.create(notification("first")).await.unwrap();
        let second = sink.create(notification("second")).await.unwrap();
        sink.delete(first.id().unwrap()).await.unwrap();

        // Act
        let third = sink.create(notification("third")).await.unwrap();
        let marked = sink.mark_read(third.id().unwrap()).await.unwrap();

        // Assert
        assert!(marked);
        assert_eq!(third.id(), Some(3));
        assert_ne!(second.id(), third.id());
        let unread = sink.fetch_unread(5).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id(), second.id());
    }
}
