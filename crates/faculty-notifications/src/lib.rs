//! Faculty: notification fan-out.
//!
//! Business actions publish through the assignment and preference producers.
//! Each producer owns one event channel that hands every event, in
//! registration order, to its listeners: the notification listener turns it
//! into a stored notification, the diagnostic listener traces it.

pub mod application;
pub mod domain;
