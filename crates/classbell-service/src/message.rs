//! Outbound reminder messages.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use classbell_core::constants::{DEFAULT_ANDROID_CHANNEL, DEFAULT_TTL_MINUTES};
use classbell_schedule::ClassEntry;
use classbell_schedule::model::FALLBACK_SUBJECT;

/// Payload `type` tag clients use to recognise class reminders.
pub const REMINDER_TYPE: &str = "class_reminder";

/// Transport-independent push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Push token of the recipient device.
    pub recipient: String,
    pub title: String,
    pub body: String,
    /// String-only key/value payload delivered alongside the notification.
    pub data: BTreeMap<String, String>,
    /// Transport drops the message if it is still undelivered after this long.
    pub ttl: Duration,
    pub android_channel_id: String,
}

/// Delivery hints shared by every message of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    pub ttl: Duration,
    pub android_channel_id: String,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(u64::from(DEFAULT_TTL_MINUTES) * 60),
            android_channel_id: DEFAULT_ANDROID_CHANNEL.to_string(),
        }
    }
}

impl OutboundMessage {
    /// ## Summary
    /// Builds the reminder for one class occurrence and lead time.
    ///
    /// The body shows the start time on the recipient's local clock; the
    /// payload carries the occurrence as an absolute UTC timestamp.
    #[must_use]
    pub fn class_reminder<Tz>(
        recipient: &str,
        entry: &ClassEntry,
        occurrence: &DateTime<Tz>,
        minutes_before: u32,
        options: &MessageOptions,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let subject = entry.subject();
        let title = format!("Clase: {}", subject.unwrap_or(FALLBACK_SUBJECT));

        let start = occurrence.format("%H:%M");
        let body = match entry.room() {
            Some(room) => format!("Empieza a las {start} • Salón {room}"),
            None => format!("Empieza a las {start}"),
        };

        let class_start = occurrence
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let data = BTreeMap::from([
            ("type".to_string(), REMINDER_TYPE.to_string()),
            ("minutesBefore".to_string(), minutes_before.to_string()),
            ("classStartIso".to_string(), class_start),
            ("materia".to_string(), subject.unwrap_or_default().to_string()),
        ]);

        Self {
            recipient: recipient.to_string(),
            title,
            body,
            data,
            ttl: options.ttl,
            android_channel_id: options.android_channel_id.clone(),
        }
    }
}
