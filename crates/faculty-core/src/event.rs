//! Business events and the listener contract.
//!
//! Events are transient: they exist only for the duration of one dispatch
//! and are never persisted.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Tag for [`EventKind::AssignmentCreated`].
pub const ASSIGNMENT_CREATED_EVENT_TYPE: &str = "assignment-created";

/// Tag for [`EventKind::AssignmentModified`].
pub const ASSIGNMENT_MODIFIED_EVENT_TYPE: &str = "assignment-modified";

/// Tag for [`EventKind::PreferenceApproved`].
pub const PREFERENCE_APPROVED_EVENT_TYPE: &str = "preference-approved";

/// Tag for [`EventKind::PreferenceRejected`].
pub const PREFERENCE_REJECTED_EVENT_TYPE: &str = "preference-rejected";

/// The category of business event being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A subject was assigned to an instructor.
    AssignmentCreated,
    /// An existing assignment was saved again for the same instructor.
    AssignmentModified,
    /// An instructor's teaching preference was approved.
    PreferenceApproved,
    /// An instructor's teaching preference was rejected.
    PreferenceRejected,
    /// Any tag outside the known set. Listeners ignore it.
    Unrecognized(String),
}

impl EventKind {
    /// Returns the wire tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AssignmentCreated => ASSIGNMENT_CREATED_EVENT_TYPE,
            Self::AssignmentModified => ASSIGNMENT_MODIFIED_EVENT_TYPE,
            Self::PreferenceApproved => PREFERENCE_APPROVED_EVENT_TYPE,
            Self::PreferenceRejected => PREFERENCE_REJECTED_EVENT_TYPE,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Whether this is one of the four known kinds.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            ASSIGNMENT_CREATED_EVENT_TYPE => Self::AssignmentCreated,
            ASSIGNMENT_MODIFIED_EVENT_TYPE => Self::AssignmentModified,
            PREFERENCE_APPROVED_EVENT_TYPE => Self::PreferenceApproved,
            PREFERENCE_REJECTED_EVENT_TYPE => Self::PreferenceRejected,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named fields carried by a business event.
///
/// Displays as compact JSON with camelCase keys; `subjectId` is omitted when
/// absent (preference events do not carry it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// The instructor the event concerns.
    pub instructor_id: i64,
    /// The subject identifier, for assignment events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    /// Human-readable subject name.
    pub subject_name: String,
}

impl EventPayload {
    /// Payload for assignment lifecycle events.
    #[must_use]
    pub fn assignment(instructor_id: i64, subject_id: i64, subject_name: impl Into<String>) -> Self {
        Self {
            instructor_id,
            subject_id: Some(subject_id),
            subject_name: subject_name.into(),
        }
    }

    /// Payload for preference lifecycle events.
    #[must_use]
    pub fn preference(instructor_id: i64, subject_name: impl Into<String>) -> Self {
        Self {
            instructor_id,
            subject_id: None,
            subject_name: subject_name.into(),
        }
    }
}

impl fmt::Display for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// A tagged payload handed to every listener of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessEvent {
    /// What happened.
    pub kind: EventKind,
    /// The data describing it.
    pub payload: EventPayload,
}

impl BusinessEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self { kind, payload }
    }
}

/// A subscriber to an event channel.
///
/// Listeners are registered by shared reference and compared by identity, so
/// two listeners with identical configuration are still distinct.
#[async_trait]
pub trait EventListener: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reacts to a dispatched event.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the listener could not complete its side
    /// effect. The channel logs it and moves on to the next listener.
    async fn on_event(&self, event: &BusinessEvent) -> Result<(), DomainError>;
}
