//! The process-wide pair of producers and their standard listeners.

use std::sync::Arc;
use std::time::Duration;

use faculty_core::clock::Clock;
use faculty_core::event::EventListener;
use faculty_core::repository::NotificationSink;
use tracing::info;

use super::channel::EventChannel;
use super::listeners::{DiagnosticListener, NotificationListener};
use super::producers::{AssignmentProducer, PreferenceProducer};

/// Owns the assignment and preference producers.
///
/// Build one at startup, share it behind an `Arc`, and pass it into every
/// business action. Listener registration happens here, once.
#[derive(Debug)]
pub struct NotificationHub {
    assignments: AssignmentProducer,
    preferences: PreferenceProducer,
}

impl NotificationHub {
    /// Creates a hub whose channels have no listeners yet.
    #[must_use]
    pub fn new(listener_timeout: Option<Duration>) -> Self {
        let channel = |name| {
            let channel = EventChannel::new(name);
            match listener_timeout {
                Some(limit) => channel.with_listener_timeout(limit),
                None => channel,
            }
        };
        Self {
            assignments: AssignmentProducer::with_channel(channel(
                AssignmentProducer::CHANNEL_NAME,
            )),
            preferences: PreferenceProducer::with_channel(channel(
                PreferenceProducer::CHANNEL_NAME,
            )),
        }
    }

    /// Creates a hub with one shared notification listener followed by one
    /// diagnostic listener on both channels.
    #[must_use]
    pub fn with_default_listeners(
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        listener_timeout: Option<Duration>,
    ) -> Self {
        let hub = Self::new(listener_timeout);
        let notifications: Arc<dyn EventListener> =
            Arc::new(NotificationListener::new(sink, clock));
        let diagnostics: Arc<dyn EventListener> = Arc::new(DiagnosticListener);

        for channel in [hub.assignments.channel(), hub.preferences.channel()] {
            channel.register(Arc::clone(&notifications));
            channel.register(Arc::clone(&diagnostics));
        }

        info!(
            assignment_listeners = hub.assignments.channel().listener_count(),
            preference_listeners = hub.preferences.channel().listener_count(),
            "notification hub ready"
        );
        hub
    }

    /// Producer for assignment lifecycle events.
    #[must_use]
    pub fn assignments(&self) -> &AssignmentProducer {
        &self.assignments
    }

    /// Producer for preference review events.
    #[must_use]
    pub fn preferences(&self) -> &PreferenceProducer {
        &self.preferences
    }
}
