//! Test listeners: `EventListener` implementations for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use faculty_core::error::DomainError;
use faculty_core::event::{BusinessEvent, EventListener};

/// A shared, ordered log of listener activity. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    /// Returns a snapshot of all entries in the order they were written.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// A listener that records every event it receives and writes
/// `"<label>:start"` / `"<label>:end"` entries around a scheduler yield, so
/// tests can check that one listener finishes before the next begins.
#[derive(Debug)]
pub struct RecordingListener {
    label: &'static str,
    journal: Journal,
    received: Mutex<Vec<BusinessEvent>>,
}

impl RecordingListener {
    /// Create a listener writing to `journal` under `label`.
    #[must_use]
    pub fn new(label: &'static str, journal: Journal) -> Self {
        Self {
            label,
            journal,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the events received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<BusinessEvent> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventListener for RecordingListener {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn on_event(&self, event: &BusinessEvent) -> Result<(), DomainError> {
        self.journal.push(format!("{}:start", self.label));
        tokio::task::yield_now().await;
        self.received.lock().unwrap().push(event.clone());
        self.journal.push(format!("{}:end", self.label));
        Ok(())
    }
}

/// A listener that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingListener;

#[async_trait]
impl EventListener for FailingListener {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn on_event(&self, _event: &BusinessEvent) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("listener backend unavailable".into()))
    }
}

/// A listener that panics on every event.
#[derive(Debug)]
pub struct PanickingListener;

#[async_trait]
impl EventListener for PanickingListener {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn on_event(&self, event: &BusinessEvent) -> Result<(), DomainError> {
        panic!("listener blew up on {}", event.kind);
    }
}

/// A listener that sleeps for the configured duration before succeeding.
#[derive(Debug)]
pub struct SlowListener(pub Duration);

#[async_trait]
impl EventListener for SlowListener {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn on_event(&self, _event: &BusinessEvent) -> Result<(), DomainError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}
