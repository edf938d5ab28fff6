//! Application layer: channels, producers, listeners and their wiring.

pub mod channel;
pub mod hub;
pub mod listeners;
pub mod producers;
