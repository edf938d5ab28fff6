//! The notification record delivered to a single user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::DomainError;

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCategory {
    /// Neutral information.
    #[serde(rename = "info")]
    Informational,
    /// Something the user should look at.
    #[serde(rename = "warning")]
    Warning,
    /// A positive outcome.
    #[serde(rename = "success")]
    Success,
    /// A failure.
    #[serde(rename = "error")]
    Error,
}

impl NotificationCategory {
    /// Returns the stored name of this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Informational),
            "warning" => Ok(Self::Warning),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(DomainError::Validation(format!(
                "unknown notification category: {other}"
            ))),
        }
    }
}

/// One message to one user.
///
/// The identity stays `None` until a sink persists the record. The read flag
/// only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: Option<i64>,
    recipient_id: i64,
    title: String,
    message: String,
    category: NotificationCategory,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unsaved, unread notification timestamped by `clock`.
    #[must_use]
    pub fn new(
        recipient_id: i64,
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: None,
            recipient_id,
            title: title.into(),
            message: message.into(),
            category,
            read: false,
            created_at: clock.now(),
        }
    }

    /// Rebuilds a persisted notification from storage.
    #[must_use]
    pub fn restore(
        id: i64,
        recipient_id: i64,
        title: String,
        message: String,
        category: NotificationCategory,
        read: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            recipient_id,
            title,
            message,
            category,
            read,
            created_at,
        }
    }

    /// Returns this record carrying the identity a sink assigned to it.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Marks the notification as read. There is no way back.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Sink-assigned identity, if persisted.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The user this notification is addressed to.
    #[must_use]
    pub fn recipient_id(&self) -> i64 {
        self.recipient_id
    }

    /// Short title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Visual category.
    #[must_use]
    pub fn category(&self) -> NotificationCategory {
        self.category
    }

    /// Whether the recipient has read it.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// When the record was constructed.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
