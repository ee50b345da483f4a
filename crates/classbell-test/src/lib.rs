//! Classbell reminder job - integration test support.
//!
//! Re-exports the workspace crates under one path and provides schedule
//! fixtures shared by the integration tests.

pub mod component {
    pub use classbell_app::bootstrap;
    pub use classbell_core::{config, constants};
    pub use classbell_schedule as schedule;
    pub use classbell_service as service;
    pub use classbell_store as store;
}

pub mod fixture {
    use classbell_schedule::{ClassEntry, ScheduleDocument};

    /// Class entry with the given weekday text, start time and subject.
    #[must_use]
    pub fn class(day: &str, start: &str, subject: &str) -> ClassEntry {
        ClassEntry {
            day_text: Some(day.to_string()),
            start_time_text: Some(start.to_string()),
            subject_label: Some(subject.to_string()),
            ..ClassEntry::default()
        }
    }

    /// Schedule document keyed by its recipient handle.
    #[must_use]
    pub fn document(recipient: &str, classes: Vec<ClassEntry>) -> ScheduleDocument {
        ScheduleDocument {
            identifier: format!("doc-{recipient}"),
            recipient_handle: Some(recipient.to_string()),
            time_zone: None,
            class_entries: classes,
        }
    }
}
