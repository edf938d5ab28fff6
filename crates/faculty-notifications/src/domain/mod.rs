//! Domain layer for notification fan-out.

pub mod templates;
