//! Command handlers for the Assignments & Preferences context.
//!
//! Each handler validates against the current state, performs its
//! persistence update, and only after that update succeeded publishes the
//! matching event. Notification delivery never changes a handler's result.

use faculty_core::catalog::{PreferenceStatus, TeachingPreference};
use faculty_core::command::Command;
use faculty_core::error::DomainError;
use faculty_core::event::EventKind;
use faculty_core::repository::{
    InstructorDirectory, NotificationSink, PreferenceRepository, SubjectRepository,
};
use faculty_notifications::application::producers::{AssignmentProducer, PreferenceProducer};
use tracing::{info, instrument};

use crate::domain::commands::{
    ApprovePreference, AssignSubject, MarkAllNotificationsRead, MarkNotificationRead,
    RejectPreference, SubmitPreference,
};

/// Subject name used in notifications when the subject no longer exists.
pub const UNKNOWN_SUBJECT_NAME: &str = "Unknown";

/// Result of a successfully handled `AssignSubject` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    /// The updated subject.
    pub subject_id: i64,
    /// The instructor now holding the subject, if any.
    pub instructor_id: Option<i64>,
    /// The event published, if any.
    pub published: Option<EventKind>,
}

/// Result of a successfully handled preference review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceReviewResult {
    /// The reviewed preference.
    pub preference_id: i64,
    /// Its new status.
    pub status: PreferenceStatus,
    /// The event published.
    pub published: EventKind,
}

/// Handles the `AssignSubject` command: checks that the subject and the
/// instructor exist, stores the assignment, then publishes
/// `assignment-created`, or `assignment-modified` when the instructor already
/// held the subject. Unassigning publishes nothing.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the subject or instructor does not
/// exist, `DomainError::Infrastructure` if the store did not apply the
/// update or a lookup fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    subject_id = command.subject_id,
    instructor_id = ?command.instructor_id,
))]
pub async fn handle_assign_subject(
    command: &AssignSubject,
    subjects: &dyn SubjectRepository,
    instructors: &dyn InstructorDirectory,
    producer: &AssignmentProducer,
) -> Result<AssignmentResult, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    let subject = subjects
        .find_by_id(command.subject_id)
        .await?
        .ok_or_else(|| DomainError::not_found("subject", command.subject_id))?;

    if let Some(instructor_id) = command.instructor_id {
        if !instructors.instructor_exists(instructor_id).await? {
            return Err(DomainError::not_found("instructor", instructor_id));
        }
    }

    if !subjects
        .assign_instructor(command.subject_id, command.instructor_id)
        .await?
    {
        return Err(DomainError::Infrastructure(format!(
            "assignment of subject {} was not applied",
            command.subject_id
        )));
    }

    let published = match command.instructor_id {
        Some(instructor_id) if subject.instructor_id == Some(instructor_id) => {
            producer
                .record_assignment_modified(instructor_id, subject.id, &subject.name)
                .await;
            Some(EventKind::AssignmentModified)
        }
        Some(instructor_id) => {
            producer
                .record_assignment_created(instructor_id, subject.id, &subject.name)
                .await;
            Some(EventKind::AssignmentCreated)
        }
        None => None,
    };

    Ok(AssignmentResult {
        subject_id: subject.id,
        instructor_id: command.instructor_id,
        published,
    })
}

/// Handles the `ApprovePreference` command: stores the approval, then
/// publishes `preference-approved` to the preference's instructor.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the preference does not exist,
/// `DomainError::Infrastructure` if the store did not apply the update or a
/// lookup fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    preference_id = command.preference_id,
))]
pub async fn handle_approve_preference(
    command: &ApprovePreference,
    preferences: &dyn PreferenceRepository,
    subjects: &dyn SubjectRepository,
    producer: &PreferenceProducer,
) -> Result<PreferenceReviewResult, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    let (preference, subject_name) = review_preference(
        command.preference_id,
        PreferenceStatus::Approved,
        preferences,
        subjects,
    )
    .await?;

    producer
        .record_preference_approved(preference.instructor_id, &subject_name)
        .await;

    Ok(PreferenceReviewResult {
        preference_id: command.preference_id,
        status: PreferenceStatus::Approved,
        published: EventKind::PreferenceApproved,
    })
}

/// Handles the `RejectPreference` command: stores the rejection, then
/// publishes `preference-rejected` to the preference's instructor.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the preference does not exist,
/// `DomainError::Infrastructure` if the store did not apply the update or a
/// lookup fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    preference_id = command.preference_id,
))]
pub async fn handle_reject_preference(
    command: &RejectPreference,
    preferences: &dyn PreferenceRepository,
    subjects: &dyn SubjectRepository,
    producer: &PreferenceProducer,
) -> Result<PreferenceReviewResult, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    let (preference, subject_name) = review_preference(
        command.preference_id,
        PreferenceStatus::Rejected,
        preferences,
        subjects,
    )
    .await?;

    producer
        .record_preference_rejected(preference.instructor_id, &subject_name)
        .await;

    Ok(PreferenceReviewResult {
        preference_id: command.preference_id,
        status: PreferenceStatus::Rejected,
        published: EventKind::PreferenceRejected,
    })
}

/// Loads the preference, stores its new status and resolves the subject name
/// for the notification.
async fn review_preference(
    preference_id: i64,
    status: PreferenceStatus,
    preferences: &dyn PreferenceRepository,
    subjects: &dyn SubjectRepository,
) -> Result<(TeachingPreference, String), DomainError> {
    let preference = preferences
        .find_by_id(preference_id)
        .await?
        .ok_or_else(|| DomainError::not_found("preference", preference_id))?;

    if !preferences.update_status(preference_id, status).await? {
        return Err(DomainError::Infrastructure(format!(
            "status change of preference {preference_id} was not applied"
        )));
    }

    let subject_name = subjects
        .find_by_id(preference.subject_id)
        .await?
        .map_or_else(|| UNKNOWN_SUBJECT_NAME.to_owned(), |subject| subject.name);

    Ok((preference, subject_name))
}

/// Handles the `SubmitPreference` command: stores a new pending preference.
/// No event is published.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the weekday or time slot is blank,
/// `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    instructor_id = command.instructor_id,
    subject_id = command.subject_id,
))]
pub async fn handle_submit_preference(
    command: &SubmitPreference,
    preferences: &dyn PreferenceRepository,
) -> Result<TeachingPreference, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    let weekday = command.weekday.trim();
    let time_slot = command.time_slot.trim();
    if weekday.is_empty() {
        return Err(DomainError::Validation("weekday must not be blank".into()));
    }
    if time_slot.is_empty() {
        return Err(DomainError::Validation("time slot must not be blank".into()));
    }

    preferences
        .create(TeachingPreference {
            id: None,
            instructor_id: command.instructor_id,
            subject_id: command.subject_id,
            weekday: weekday.to_owned(),
            time_slot: time_slot.to_owned(),
            status: PreferenceStatus::Pending,
        })
        .await
}

/// Handles the `MarkNotificationRead` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the notification does not exist,
/// `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    notification_id = command.notification_id,
))]
pub async fn handle_mark_notification_read(
    command: &MarkNotificationRead,
    sink: &dyn NotificationSink,
) -> Result<(), DomainError> {
    info!(command_type = command.command_type(), "handling command");

    if sink.mark_read(command.notification_id).await? {
        Ok(())
    } else {
        Err(DomainError::not_found(
            "notification",
            command.notification_id,
        ))
    }
}

/// Handles the `MarkAllNotificationsRead` command. Returns whether any
/// notification was touched.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    correlation_id = %command.correlation_id,
    user_id = command.user_id,
))]
pub async fn handle_mark_all_notifications_read(
    command: &MarkAllNotificationsRead,
    sink: &dyn NotificationSink,
) -> Result<bool, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    sink.mark_all_read(command.user_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use faculty_core::catalog::PreferenceStatus;
    use faculty_core::error::DomainError;
    use faculty_core::event::EventKind;
    use faculty_core::notification::NotificationCategory;
    use faculty_core::repository::NotificationSink;
    use faculty_notifications::application::hub::NotificationHub;
    use faculty_test_support::{
        CapturedLogs, FailingNotificationSink, FixedClock, InMemoryNotificationSink,
        InMemoryPreferenceRepository, InMemorySubjectRepository, StaticInstructorDirectory,
        sample_preference, sample_subject,
    };
    use uuid::Uuid;

    use super::*;

    fn hub_over(sink: Arc<dyn NotificationSink>) -> NotificationHub {
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        NotificationHub::with_default_listeners(sink, clock, None)
    }

    fn assign(subject_id: i64, instructor_id: Option<i64>) -> AssignSubject {
        AssignSubject {
            correlation_id: Uuid::new_v4(),
            subject_id,
            instructor_id,
        }
    }

    #[tokio::test]
    async fn test_assign_unassigned_subject_publishes_assignment_created() {
        // Arrange
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects = InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", None)]);
        let instructors = StaticInstructorDirectory::new([5]);

        // Act
        let result =
            handle_assign_subject(&assign(10, Some(5)), &subjects, &instructors, hub.assignments())
                .await
                .unwrap();

        // Assert
        assert_eq!(result.published, Some(EventKind::AssignmentCreated));
        assert_eq!(subjects.subject(10).unwrap().instructor_id, Some(5));
        let created = sink.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].recipient_id(), 5);
        assert_eq!(
            created[0].message(),
            "You have been assigned the subject: Calculus"
        );
    }

    #[tokio::test]
    async fn test_reassigning_same_instructor_publishes_assignment_modified() {
        // Arrange
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects =
            InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", Some(5))]);
        let instructors = StaticInstructorDirectory::new([5]);

        // Act
        let result =
            handle_assign_subject(&assign(10, Some(5)), &subjects, &instructors, hub.assignments())
                .await
                .unwrap();

        // Assert
        assert_eq!(result.published, Some(EventKind::AssignmentModified));
        let created = sink.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title(), "Assignment Modified");
        assert_eq!(created[0].category(), NotificationCategory::Informational);
    }

    #[tokio::test]
    async fn test_moving_subject_to_other_instructor_notifies_new_holder() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects =
            InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", Some(5))]);
        let instructors = StaticInstructorDirectory::new([5, 6]);

        let result =
            handle_assign_subject(&assign(10, Some(6)), &subjects, &instructors, hub.assignments())
                .await
                .unwrap();

        assert_eq!(result.published, Some(EventKind::AssignmentCreated));
        assert_eq!(sink.created()[0].recipient_id(), 6);
    }

    #[tokio::test]
    async fn test_unassigning_subject_publishes_nothing() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects =
            InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", Some(5))]);
        let instructors = StaticInstructorDirectory::new([5]);

        let result =
            handle_assign_subject(&assign(10, None), &subjects, &instructors, hub.assignments())
                .await
                .unwrap();

        assert_eq!(result.published, None);
        assert_eq!(subjects.subject(10).unwrap().instructor_id, None);
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_assign_returns_not_found_for_missing_subject() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects = InMemorySubjectRepository::new(vec![]);
        let instructors = StaticInstructorDirectory::new([5]);

        let result =
            handle_assign_subject(&assign(99, Some(5)), &subjects, &instructors, hub.assignments())
                .await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "subject");
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_assign_returns_not_found_for_missing_instructor() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects = InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", None)]);
        let instructors = StaticInstructorDirectory::new([5]);

        let result =
            handle_assign_subject(&assign(10, Some(77)), &subjects, &instructors, hub.assignments())
                .await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "instructor");
                assert_eq!(id, 77);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(subjects.subject(10).unwrap().instructor_id, None);
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_assign_publishes_nothing_when_store_rejects_update() {
        // Arrange
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let subjects = InMemorySubjectRepository::rejecting_writes(vec![sample_subject(
            10, "Calculus", None,
        )]);
        let instructors = StaticInstructorDirectory::new([5]);

        // Act
        let result =
            handle_assign_subject(&assign(10, Some(5)), &subjects, &instructors, hub.assignments())
                .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_assign_succeeds_even_when_notification_store_is_down() {
        // Arrange
        let hub = hub_over(Arc::new(FailingNotificationSink));
        let subjects = InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", None)]);
        let instructors = StaticInstructorDirectory::new([5]);

        // Act
        let result =
            handle_assign_subject(&assign(10, Some(5)), &subjects, &instructors, hub.assignments())
                .await;

        // Assert
        let result = result.unwrap();
        assert_eq!(result.published, Some(EventKind::AssignmentCreated));
        assert_eq!(subjects.subject(10).unwrap().instructor_id, Some(5));
    }

    #[tokio::test]
    async fn test_approve_preference_stores_status_and_notifies_instructor() {
        // Arrange
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let preferences = InMemoryPreferenceRepository::new(vec![sample_preference(
            1,
            8,
            10,
            PreferenceStatus::Pending,
        )]);
        let subjects = InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", None)]);
        let command = ApprovePreference {
            correlation_id: Uuid::new_v4(),
            preference_id: 1,
        };

        // Act
        let result =
            handle_approve_preference(&command, &preferences, &subjects, hub.preferences())
                .await
                .unwrap();

        // Assert
        assert_eq!(result.status, PreferenceStatus::Approved);
        assert_eq!(result.published, EventKind::PreferenceApproved);
        assert_eq!(
            preferences.preference(1).unwrap().status,
            PreferenceStatus::Approved
        );
        let created = sink.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].recipient_id(), 8);
        assert_eq!(
            created[0].message(),
            "Your preference for Calculus has been approved"
        );
    }

    #[tokio::test]
    async fn test_reject_preference_for_deleted_subject_uses_unknown_name() {
        // Arrange
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let preferences = InMemoryPreferenceRepository::new(vec![sample_preference(
            2,
            8,
            404,
            PreferenceStatus::Pending,
        )]);
        let subjects = InMemorySubjectRepository::new(vec![]);
        let command = RejectPreference {
            correlation_id: Uuid::new_v4(),
            preference_id: 2,
        };

        // Act
        let result = handle_reject_preference(&command, &preferences, &subjects, hub.preferences())
            .await
            .unwrap();

        // Assert
        assert_eq!(result.status, PreferenceStatus::Rejected);
        let created = sink.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].category(), NotificationCategory::Warning);
        assert_eq!(
            created[0].message(),
            "Your preference for Unknown has been rejected"
        );
    }

    #[tokio::test]
    async fn test_review_of_missing_preference_returns_not_found() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let preferences = InMemoryPreferenceRepository::new(vec![]);
        let subjects = InMemorySubjectRepository::new(vec![]);
        let command = ApprovePreference {
            correlation_id: Uuid::new_v4(),
            preference_id: 3,
        };

        let result =
            handle_approve_preference(&command, &preferences, &subjects, hub.preferences()).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: "preference",
                id: 3
            })
        ));
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_review_publishes_nothing_when_store_rejects_update() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let hub = hub_over(sink.clone());
        let preferences = InMemoryPreferenceRepository::rejecting_writes(vec![sample_preference(
            1,
            8,
            10,
            PreferenceStatus::Pending,
        )]);
        let subjects = InMemorySubjectRepository::new(vec![sample_subject(10, "Calculus", None)]);
        let command = RejectPreference {
            correlation_id: Uuid::new_v4(),
            preference_id: 1,
        };

        let result =
            handle_reject_preference(&command, &preferences, &subjects, hub.preferences()).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_submit_preference_stores_pending_preference() {
        // Arrange
        let preferences = InMemoryPreferenceRepository::new(vec![]);
        let command = SubmitPreference {
            correlation_id: Uuid::new_v4(),
            instructor_id: 8,
            subject_id: 10,
            weekday: " Wednesday ".to_owned(),
            time_slot: "14:00-16:00".to_owned(),
        };

        // Act
        let stored = handle_submit_preference(&command, &preferences)
            .await
            .unwrap();

        // Assert
        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.status, PreferenceStatus::Pending);
        assert_eq!(stored.weekday, "Wednesday");
        assert_eq!(preferences.preference(1).unwrap(), stored);
    }

    #[tokio::test]
    async fn test_submit_preference_rejects_blank_time_slot() {
        let preferences = InMemoryPreferenceRepository::new(vec![]);
        let command = SubmitPreference {
            correlation_id: Uuid::new_v4(),
            instructor_id: 8,
            subject_id: 10,
            weekday: "Friday".to_owned(),
            time_slot: "   ".to_owned(),
        };

        let result = handle_submit_preference(&command, &preferences).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(preferences.preference(1).is_none());
    }

    #[tokio::test]
    async fn test_mark_read_handlers_log_their_command_type() {
        // Arrange
        let logs = CapturedLogs::start();
        let sink = InMemoryNotificationSink::new();
        let mark_one = MarkNotificationRead {
            correlation_id: Uuid::new_v4(),
            notification_id: 1,
        };
        let mark_all = MarkAllNotificationsRead {
            correlation_id: Uuid::new_v4(),
            user_id: 5,
        };

        // Act
        let _ = handle_mark_notification_read(&mark_one, &sink).await;
        handle_mark_all_notifications_read(&mark_all, &sink)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            logs.lines_containing("assignments.mark_notification_read")
                .len(),
            1
        );
        assert_eq!(
            logs.lines_containing("assignments.mark_all_notifications_read")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_mark_unknown_notification_read_returns_not_found() {
        let sink = InMemoryNotificationSink::new();
        let command = MarkNotificationRead {
            correlation_id: Uuid::new_v4(),
            notification_id: 41,
        };

        let result = handle_mark_notification_read(&command, &sink).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: "notification",
                id: 41
            })
        ));
    }
}
