//! Weekly class schedules: weekday and start-time parsing, time zone
//! resolution, next-occurrence calculation and reminder window matching.
//!
//! Everything here is synchronous and free of side effects apart from
//! tracing; each tick recomputes occurrences from raw schedule data.

pub mod error;
pub mod model;
pub mod occurrence;
pub mod start_time;
pub mod weekday;
pub mod window;
pub mod zone;

pub use model::{ClassEntry, ScheduleDocument};
pub use occurrence::next_occurrence;
pub use start_time::StartTime;
pub use weekday::normalize_weekday;
pub use window::ReminderWindow;
pub use zone::ZoneResolver;
