//! Persistence collaborators.
//!
//! The notification sink is the only store the fan-out core writes to. The
//! remaining traits are read and updated by the business actions before they
//! publish an event.

use async_trait::async_trait;

use crate::catalog::{PreferenceStatus, Subject, TeachingPreference};
use crate::error::DomainError;
use crate::notification::Notification;

/// Persistence boundary for notification records.
///
/// Every operation is atomic and immediately visible to subsequent reads.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Stores a new notification and returns it with its assigned identity.
    async fn create(&self, notification: Notification) -> Result<Notification, DomainError>;

    /// All notifications for `user_id`, most recent first.
    async fn fetch_by_user(&self, user_id: i64) -> Result<Vec<Notification>, DomainError>;

    /// Unread notifications for `user_id`, most recent first.
    async fn fetch_unread(&self, user_id: i64) -> Result<Vec<Notification>, DomainError>;

    /// Marks one notification read. Returns `false` if no such notification
    /// exists.
    async fn mark_read(&self, id: i64) -> Result<bool, DomainError>;

    /// Marks every notification of `user_id` read. Returns `false` if the user
    /// has none.
    async fn mark_all_read(&self, user_id: i64) -> Result<bool, DomainError>;

    /// Removes a notification. Administrative only; the event path never
    /// deletes.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Subject catalog access.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Looks up a subject.
    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Subject>, DomainError>;

    /// Sets or clears the subject's instructor. Returns `false` if no row was
    /// updated.
    async fn assign_instructor(
        &self,
        subject_id: i64,
        instructor_id: Option<i64>,
    ) -> Result<bool, DomainError>;
}

/// Teaching preference storage.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Looks up a preference.
    async fn find_by_id(
        &self,
        preference_id: i64,
    ) -> Result<Option<TeachingPreference>, DomainError>;

    /// Stores a new preference and returns it with its assigned identity.
    async fn create(
        &self,
        preference: TeachingPreference,
    ) -> Result<TeachingPreference, DomainError>;

    /// Changes a preference's review status. Returns `false` if no row was
    /// updated.
    async fn update_status(
        &self,
        preference_id: i64,
        status: PreferenceStatus,
    ) -> Result<bool, DomainError>;
}

/// Lookup of registered instructors.
#[async_trait]
pub trait InstructorDirectory: Send + Sync {
    /// Whether an instructor with this identifier exists.
    async fn instructor_exists(&self, instructor_id: i64) -> Result<bool, DomainError>;
}
