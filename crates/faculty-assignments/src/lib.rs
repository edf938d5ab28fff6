//! Faculty: Assignments & Preferences business actions.
//!
//! Administrative staff assign subjects to instructors and review teaching
//! preferences; instructors submit preferences and read their notifications.
//! Every state change is persisted first and only then published through the
//! notification hub's producers.

pub mod application;
pub mod domain;
