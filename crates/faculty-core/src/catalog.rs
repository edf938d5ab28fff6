//! Subjects and teaching preferences read by the business actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A subject offered by the faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject identifier.
    pub id: i64,
    /// Display name, used in notification messages.
    pub name: String,
    /// Catalog code.
    pub code: String,
    /// Assigned classroom.
    pub classroom: String,
    /// Credit count.
    pub credits: i32,
    /// The instructor currently teaching it, if any.
    pub instructor_id: Option<i64>,
}

/// Review state of a teaching preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by administrative staff.
    Approved,
    /// Declined by administrative staff.
    Rejected,
}

impl PreferenceStatus {
    /// Returns the stored name of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PreferenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown preference status: {other}"
            ))),
        }
    }
}

/// An instructor's wish to teach a subject in a given slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingPreference {
    /// Identifier, assigned when the preference is stored.
    pub id: Option<i64>,
    /// The instructor who submitted it.
    pub instructor_id: i64,
    /// The requested subject.
    pub subject_id: i64,
    /// Requested weekday.
    pub weekday: String,
    /// Requested time slot, e.g. `"08:00-10:00"`.
    pub time_slot: String,
    /// Review state.
    pub status: PreferenceStatus,
}
