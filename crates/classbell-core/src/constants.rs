/// Zone used for documents that carry no `tz` field.
pub const DEFAULT_TIME_ZONE: &str = "America/Mexico_City";

/// Lead times, in minutes before class start, evaluated on every tick.
pub const DEFAULT_LEAD_TIMES: [u32; 2] = [10, 5];

/// How many minutes after a reminder's target instant it is still sent.
pub const DEFAULT_GRACE_MINUTES: i64 = 10;

/// How many minutes before a reminder's target instant it may already be sent.
pub const DEFAULT_EARLY_MINUTES: i64 = 1;

/// Upper bound on how long the push transport keeps an undelivered reminder.
pub const DEFAULT_TTL_MINUTES: u32 = 40;

pub const DEFAULT_SEND_TIMEOUT_SECS: u32 = 30;

pub const DEFAULT_COLLECTION: &str = "schedules";
pub const DEFAULT_PAGE_SIZE: u32 = 300;
pub const DEFAULT_ANDROID_CHANNEL: &str = "reminders";

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
pub const FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// Prefix for environment variables read by [`crate::config::load_config`].
pub const ENV_PREFIX: &str = "CLASSBELL";
