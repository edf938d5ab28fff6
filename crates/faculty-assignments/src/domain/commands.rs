//! Commands for the Assignments & Preferences context.

use faculty_core::command::Command;
use uuid::Uuid;

/// Command to assign a subject to an instructor, or to clear its instructor.
#[derive(Debug, Clone)]
pub struct AssignSubject {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The subject to update.
    pub subject_id: i64,
    /// The new instructor; `None` unassigns the subject.
    pub instructor_id: Option<i64>,
}

impl Command for AssignSubject {
    fn command_type(&self) -> &'static str {
        "assignments.assign_subject"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to approve a pending teaching preference.
#[derive(Debug, Clone)]
pub struct ApprovePreference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The preference to approve.
    pub preference_id: i64,
}

impl Command for ApprovePreference {
    fn command_type(&self) -> &'static str {
        "assignments.approve_preference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to reject a pending teaching preference.
#[derive(Debug, Clone)]
pub struct RejectPreference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The preference to reject.
    pub preference_id: i64,
}

impl Command for RejectPreference {
    fn command_type(&self) -> &'static str {
        "assignments.reject_preference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command for an instructor to submit a teaching preference.
#[derive(Debug, Clone)]
pub struct SubmitPreference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitting instructor.
    pub instructor_id: i64,
    /// The requested subject.
    pub subject_id: i64,
    /// Requested weekday.
    pub weekday: String,
    /// Requested time slot.
    pub time_slot: String,
}

impl Command for SubmitPreference {
    fn command_type(&self) -> &'static str {
        "assignments.submit_preference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to mark one notification as read.
#[derive(Debug, Clone)]
pub struct MarkNotificationRead {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The notification to mark.
    pub notification_id: i64,
}

impl Command for MarkNotificationRead {
    fn command_type(&self) -> &'static str {
        "assignments.mark_notification_read"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to mark all of a user's notifications as read.
#[derive(Debug, Clone)]
pub struct MarkAllNotificationsRead {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user whose notifications are marked.
    pub user_id: i64,
}

impl Command for MarkAllNotificationsRead {
    fn command_type(&self) -> &'static str {
        "assignments.mark_all_notifications_read"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
