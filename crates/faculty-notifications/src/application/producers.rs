//! Event producers: domain-named façades over an event channel.
//!
//! Business actions call these after their own persistence update has
//! succeeded. Each call returns once every listener has run.

use faculty_core::event::{EventKind, EventPayload};
use tracing::instrument;

use super::channel::EventChannel;

/// Publishes assignment lifecycle events.
#[derive(Debug)]
pub struct AssignmentProducer {
    channel: EventChannel,
}

impl AssignmentProducer {
    /// Channel name used in logs.
    pub const CHANNEL_NAME: &'static str = "assignments";

    /// Creates a producer over a fresh channel.
    #[must_use]
    pub fn new() -> Self {
        Self::with_channel(EventChannel::new(Self::CHANNEL_NAME))
    }

    /// Creates a producer over a preconfigured channel.
    #[must_use]
    pub fn with_channel(channel: EventChannel) -> Self {
        Self { channel }
    }

    /// The channel listeners register on.
    #[must_use]
    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    /// Announces that `subject_id` was assigned to `instructor_id`.
    #[instrument(skip(self))]
    pub async fn record_assignment_created(
        &self,
        instructor_id: i64,
        subject_id: i64,
        subject_name: &str,
    ) {
        self.channel
            .dispatch(
                EventKind::AssignmentCreated,
                EventPayload::assignment(instructor_id, subject_id, subject_name),
            )
            .await;
    }

    /// Announces that the assignment of `subject_id` to `instructor_id`
    /// changed.
    #[instrument(skip(self))]
    pub async fn record_assignment_modified(
        &self,
        instructor_id: i64,
        subject_id: i64,
        subject_name: &str,
    ) {
        self.channel
            .dispatch(
                EventKind::AssignmentModified,
                EventPayload::assignment(instructor_id, subject_id, subject_name),
            )
            .await;
    }
}

impl Default for AssignmentProducer {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishes preference review events.
#[derive(Debug)]
pub struct PreferenceProducer {
    channel: EventChannel,
}

impl PreferenceProducer {
    /// Channel name used in logs.
    pub const CHANNEL_NAME: &'static str = "preferences";

    /// Creates a producer over a fresh channel.
    #[must_use]
    pub fn new() -> Self {
        Self::with_channel(EventChannel::new(Self::CHANNEL_NAME))
    }

    /// Creates a producer over a preconfigured channel.
    #[must_use]
    pub fn with_channel(channel: EventChannel) -> Self {
        Self { channel }
    }

    /// The channel listeners register on.
    #[must_use]
    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    /// Announces that `instructor_id`'s preference for `subject_name` was
    /// approved.
    #[instrument(skip(self))]
    pub async fn record_preference_approved(&self, instructor_id: i64, subject_name: &str) {
        self.channel
            .dispatch(
                EventKind::PreferenceApproved,
                EventPayload::preference(instructor_id, subject_name),
            )
            .await;
    }

    /// Announces that `instructor_id`'s preference for `subject_name` was
    /// rejected.
    #[instrument(skip(self))]
    pub async fn record_preference_rejected(&self, instructor_id: i64, subject_name: &str) {
        self.channel
            .dispatch(
                EventKind::PreferenceRejected,
                EventPayload::preference(instructor_id, subject_name),
            )
            .await;
    }
}

impl Default for PreferenceProducer {
    fn default() -> Self {
        Self::new()
    }
}
