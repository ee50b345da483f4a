use std::path::Path;

use config::Config;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ANDROID_CHANNEL, DEFAULT_COLLECTION, DEFAULT_EARLY_MINUTES, DEFAULT_GRACE_MINUTES,
    DEFAULT_LEAD_TIMES, DEFAULT_PAGE_SIZE, DEFAULT_SEND_TIMEOUT_SECS, DEFAULT_TIME_ZONE,
    DEFAULT_TTL_MINUTES, ENV_PREFIX, FCM_BASE_URL, FIRESTORE_BASE_URL,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub reminders: ReminderConfig,
    pub store: StoreConfig,
    pub push: PushConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    pub default_time_zone: String,
    pub lead_times: Vec<u32>,
    pub grace_minutes: i64,
    pub early_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    JsonFile,
    Firestore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: Option<String>,
    pub project_id: Option<String>,
    pub collection: String,
    pub access_token: Option<String>,
    pub base_url: String,
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushKind {
    Fcm,
    Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    pub kind: PushKind,
    pub project_id: Option<String>,
    pub access_token: Option<String>,
    pub base_url: String,
    pub ttl_minutes: u32,
    pub send_timeout_secs: u64,
    pub android_channel_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `classbell.toml` (or the
    /// given file) and `CLASSBELL_*` environment variables, then validates it.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load(file: Option<&Path>) -> CoreResult<Self> {
        let lead_times: Vec<i64> = DEFAULT_LEAD_TIMES.iter().map(|m| i64::from(*m)).collect();

        let mut builder = Config::builder()
            .set_default("reminders.default_time_zone", DEFAULT_TIME_ZONE)?
            .set_default("reminders.lead_times", lead_times)?
            .set_default("reminders.grace_minutes", DEFAULT_GRACE_MINUTES)?
            .set_default("reminders.early_minutes", DEFAULT_EARLY_MINUTES)?
            .set_default("store.kind", "json_file")?
            .set_default("store.path", "schedules.json")?
            .set_default("store.collection", DEFAULT_COLLECTION)?
            .set_default("store.base_url", FIRESTORE_BASE_URL)?
            .set_default("store.page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("push.kind", "log")?
            .set_default("push.base_url", FCM_BASE_URL)?
            .set_default("push.ttl_minutes", i64::from(DEFAULT_TTL_MINUTES))?
            .set_default("push.send_timeout_secs", i64::from(DEFAULT_SEND_TIMEOUT_SECS))?
            .set_default("push.android_channel_id", DEFAULT_ANDROID_CHANNEL)?
            .set_default("logging.level", "info")?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("classbell").required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("reminders.lead_times"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks the cross-field rules the deserializer cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` naming the first offending setting.
    pub fn validate(&self) -> CoreResult<()> {
        let reminders = &self.reminders;
        if reminders.lead_times.is_empty() {
            return Err(invalid("reminders.lead_times must not be empty"));
        }
        if reminders.lead_times.contains(&0) {
            return Err(invalid("reminders.lead_times must be positive"));
        }
        if reminders.grace_minutes < 0 || reminders.early_minutes < 0 {
            return Err(invalid("reminder window bounds must not be negative"));
        }
        if reminders.default_time_zone.parse::<chrono_tz::Tz>().is_err() {
            return Err(CoreError::InvalidConfiguration(format!(
                "unknown default time zone: {}",
                reminders.default_time_zone
            )));
        }

        match self.store.kind {
            StoreKind::JsonFile => {
                if is_blank(self.store.path.as_deref()) {
                    return Err(invalid("store.path is required for the json_file store"));
                }
            }
            StoreKind::Firestore => {
                if is_blank(self.store.project_id.as_deref()) {
                    return Err(invalid("store.project_id is required for the firestore store"));
                }
                if is_blank(self.store.access_token.as_deref()) {
                    return Err(invalid(
                        "store.access_token is required for the firestore store",
                    ));
                }
            }
        }

        if self.push.ttl_minutes == 0 {
            return Err(invalid("push.ttl_minutes must be positive"));
        }
        if self.push.send_timeout_secs == 0 {
            return Err(invalid("push.send_timeout_secs must be positive"));
        }
        if self.push.kind == PushKind::Fcm {
            if is_blank(self.push.project_id.as_deref()) {
                return Err(invalid("push.project_id is required for the fcm transport"));
            }
            if is_blank(self.push.access_token.as_deref()) {
                return Err(invalid("push.access_token is required for the fcm transport"));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::InvalidConfiguration(message.to_string())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and the optional config file.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config(file: Option<&Path>) -> CoreResult<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }

    Settings::load(file)
}
