//! Schedule documents as read from the store, one per recipient.

use chrono::Weekday;

use crate::start_time::StartTime;
use crate::weekday::normalize_weekday;

/// Subject shown when an entry carries neither `materia` nor `nombre`.
pub const FALLBACK_SUBJECT: &str = "Materia";

/// One recipient's weekly schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDocument {
    /// Store document id.
    pub identifier: String,
    /// Push token. Documents without one never produce reminders.
    pub recipient_handle: Option<String>,
    /// IANA zone name; the configured default applies when absent.
    pub time_zone: Option<String>,
    pub class_entries: Vec<ClassEntry>,
}

impl ScheduleDocument {
    /// Returns the recipient handle if it is present and non-blank.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.recipient_handle
            .as_deref()
            .filter(|handle| !handle.trim().is_empty())
    }
}

/// One recurring weekly class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassEntry {
    pub day_text: Option<String>,
    pub start_time_text: Option<String>,
    pub subject_label: Option<String>,
    /// Alternate subject field used by older clients.
    pub name_label: Option<String>,
    pub room_label: Option<String>,
}

impl ClassEntry {
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        normalize_weekday(self.day_text.as_deref().unwrap_or_default())
    }

    #[must_use]
    pub fn start_time(&self) -> StartTime {
        StartTime::parse_or_default(self.start_time_text.as_deref())
    }

    /// Subject label, if either subject field is present.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        non_blank(self.subject_label.as_deref()).or_else(|| non_blank(self.name_label.as_deref()))
    }

    #[must_use]
    pub fn room(&self) -> Option<&str> {
        non_blank(self.room_label.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
