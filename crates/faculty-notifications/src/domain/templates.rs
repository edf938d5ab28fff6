//! Fixed notification wording per event kind.

use faculty_core::clock::Clock;
use faculty_core::event::EventKind;
use faculty_core::notification::{Notification, NotificationCategory};

/// The notification produced for one known event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTemplate {
    /// For `assignment-created`.
    NewAssignment,
    /// For `assignment-modified`.
    AssignmentModified,
    /// For `preference-approved`.
    PreferenceApproved,
    /// For `preference-rejected`.
    PreferenceRejected,
}

impl NotificationTemplate {
    /// Selects the template for `kind`. Unrecognized kinds have none.
    #[must_use]
    pub fn for_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::AssignmentCreated => Some(Self::NewAssignment),
            EventKind::AssignmentModified => Some(Self::AssignmentModified),
            EventKind::PreferenceApproved => Some(Self::PreferenceApproved),
            EventKind::PreferenceRejected => Some(Self::PreferenceRejected),
            EventKind::Unrecognized(_) => None,
        }
    }

    /// Notification title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::NewAssignment => "New Subject Assignment",
            Self::AssignmentModified => "Assignment Modified",
            Self::PreferenceApproved => "Preference Approved",
            Self::PreferenceRejected => "Preference Rejected",
        }
    }

    /// Notification body for `subject_name`.
    #[must_use]
    pub fn message(self, subject_name: &str) -> String {
        match self {
            Self::NewAssignment => format!("You have been assigned the subject: {subject_name}"),
            Self::AssignmentModified => {
                format!("Your assignment for {subject_name} has been modified")
            }
            Self::PreferenceApproved => {
                format!("Your preference for {subject_name} has been approved")
            }
            Self::PreferenceRejected => {
                format!("Your preference for {subject_name} has been rejected")
            }
        }
    }

    /// Notification category.
    #[must_use]
    pub fn category(self) -> NotificationCategory {
        match self {
            Self::NewAssignment | Self::PreferenceApproved => NotificationCategory::Success,
            Self::AssignmentModified => NotificationCategory::Informational,
            Self::PreferenceRejected => NotificationCategory::Warning,
        }
    }

    /// Builds the unsaved notification for `recipient_id`.
    #[must_use]
    pub fn render(self, recipient_id: i64, subject_name: &str, clock: &dyn Clock) -> Notification {
        Notification::new(
            recipient_id,
            self.title(),
            self.message(subject_name),
            self.category(),
            clock,
        )
    }
}
