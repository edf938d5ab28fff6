//! Event channel: an ordered listener registry with one-to-many dispatch.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use faculty_core::error::DomainError;
use faculty_core::event::{BusinessEvent, EventKind, EventListener, EventPayload};
use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single listener did not complete.
#[derive(Debug, Error)]
enum ListenerFailure {
    #[error("{0}")]
    Failed(DomainError),

    #[error("panicked: {0}")]
    Panicked(String),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

fn same_listener(a: &Arc<dyn EventListener>, b: &Arc<dyn EventListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// Registry of listeners for one category of business event.
///
/// Listeners run one at a time, in registration order, and each is awaited
/// before the next starts. A listener that errors, panics or exceeds the
/// optional timeout is logged and skipped; the rest still run.
///
/// The registry lock is held only while registering, unregistering or taking
/// the per-dispatch snapshot, never while a listener runs.
pub struct EventChannel {
    name: &'static str,
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
    listener_timeout: Option<Duration>,
}

impl EventChannel {
    /// Creates an empty channel. `name` appears in logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: RwLock::new(Vec::new()),
            listener_timeout: None,
        }
    }

    /// Bounds how long any single listener may run per dispatch.
    #[must_use]
    pub fn with_listener_timeout(mut self, limit: Duration) -> Self {
        self.listener_timeout = Some(limit);
        self
    }

    /// Channel name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Adds `listener` at the end of the dispatch order unless that same
    /// instance is already registered. Returns whether it was added.
    pub fn register(&self, listener: Arc<dyn EventListener>) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if listeners.iter().any(|existing| same_listener(existing, &listener)) {
            debug!(
                channel = self.name,
                listener = listener.name(),
                "listener already registered"
            );
            return false;
        }
        debug!(channel = self.name, listener = listener.name(), "listener registered");
        listeners.push(listener);
        true
    }

    /// Removes `listener` if it is registered. Returns whether it was removed.
    pub fn unregister(&self, listener: &Arc<dyn EventListener>) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|existing| !same_listener(existing, listener));
        let removed = listeners.len() != before;
        if removed {
            debug!(channel = self.name, listener = listener.name(), "listener unregistered");
        }
        removed
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Hands the event to every registered listener, in registration order.
    ///
    /// Registrations made while a dispatch is running apply from the next
    /// dispatch on.
    pub async fn dispatch(&self, kind: EventKind, payload: EventPayload) {
        let event = BusinessEvent::new(kind, payload);
        let snapshot: Vec<Arc<dyn EventListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        debug!(
            channel = self.name,
            event_kind = %event.kind,
            listeners = snapshot.len(),
            "dispatching event"
        );

        for listener in &snapshot {
            if let Err(failure) = self.deliver(listener.as_ref(), &event).await {
                warn!(
                    channel = self.name,
                    listener = listener.name(),
                    event_kind = %event.kind,
                    error = %failure,
                    "listener failed, continuing dispatch"
                );
            }
        }
    }

    async fn deliver(
        &self,
        listener: &dyn EventListener,
        event: &BusinessEvent,
    ) -> Result<(), ListenerFailure> {
        let call = AssertUnwindSafe(listener.on_event(event)).catch_unwind();
        let outcome = match self.listener_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ListenerFailure::TimedOut(limit))?,
            None => call.await,
        };
        match outcome {
            Ok(result) => result.map_err(ListenerFailure::Failed),
            Err(payload) => Err(ListenerFailure::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field(
                "listeners",
                &listeners.iter().map(|l| l.name()).collect::<Vec<_>>(),
            )
            .field("listener_timeout", &self.listener_timeout)
            .finish()
    }
}
