//! Shared test doubles and utilities for the Faculty workspace.

mod catalog;
mod clock;
mod listener;
mod logs;
mod sink;

pub use catalog::{
    InMemoryPreferenceRepository, InMemorySubjectRepository, StaticInstructorDirectory,
    sample_preference, sample_subject,
};
pub use clock::{FixedClock, SteppingClock};
pub use listener::{FailingListener, Journal, PanickingListener, RecordingListener, SlowListener};
pub use logs::CapturedLogs;
pub use sink::{FailingNotificationSink, InMemoryNotificationSink};
