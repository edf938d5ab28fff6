//! Faculty: application wiring.
//!
//! Reads configuration from the environment, installs the tracing
//! subscriber, and builds the shared [`state::AppState`] holding the stores
//! and the notification hub.

pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
