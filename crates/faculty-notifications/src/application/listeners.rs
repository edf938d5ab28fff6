//! Channel subscribers: the notification writer and the diagnostic tracer.

use std::sync::Arc;

use async_trait::async_trait;
use faculty_core::clock::Clock;
use faculty_core::error::DomainError;
use faculty_core::event::{BusinessEvent, EventListener};
use faculty_core::repository::NotificationSink;
use tracing::{debug, info, warn};

use crate::domain::templates::NotificationTemplate;

/// Target used for the diagnostic event trace.
pub const DIAGNOSTIC_TARGET: &str = "faculty::events";

/// Turns each known event into one stored notification for the event's
/// instructor.
///
/// Delivery is best-effort: a sink failure is logged here and never reaches
/// the channel or the business action.
pub struct NotificationListener {
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl NotificationListener {
    /// Creates a listener writing through `sink`, timestamping with `clock`.
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }
}

impl std::fmt::Debug for NotificationListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationListener").finish_non_exhaustive()
    }
}

#[async_trait]
impl EventListener for NotificationListener {
    fn name(&self) -> &'static str {
        "notification"
    }

    async fn on_event(&self, event: &BusinessEvent) -> Result<(), DomainError> {
        let Some(template) = NotificationTemplate::for_kind(&event.kind) else {
            debug!(event_kind = %event.kind, "ignoring unrecognized event kind");
            return Ok(());
        };

        let notification = template.render(
            event.payload.instructor_id,
            &event.payload.subject_name,
            self.clock.as_ref(),
        );

        match self.sink.create(notification).await {
            Ok(stored) => debug!(
                notification_id = ?stored.id(),
                recipient_id = stored.recipient_id(),
                event_kind = %event.kind,
                "notification stored"
            ),
            Err(err) => warn!(
                recipient_id = event.payload.instructor_id,
                event_kind = %event.kind,
                error = %err,
                "failed to store notification"
            ),
        }
        Ok(())
    }
}

/// Traces every dispatched event, raw, for operational visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticListener;

#[async_trait]
impl EventListener for DiagnosticListener {
    fn name(&self) -> &'static str {
        "diagnostic"
    }

    async fn on_event(&self, event: &BusinessEvent) -> Result<(), DomainError> {
        info!(
            target: DIAGNOSTIC_TARGET,
            event_kind = %event.kind,
            payload = %event.payload,
            "event dispatched"
        );
        Ok(())
    }
}
