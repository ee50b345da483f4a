//! Builds the store, transport and tick runner from settings.
//!
//! Clients live as long as the process; the core receives them by injection.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use classbell_core::config::{PushKind, Settings, StoreKind};
use classbell_core::error::CoreError;
use classbell_service::transport::{FcmTransport, LogTransport};
use classbell_service::{DispatchConfig, PushTransport, ReminderDispatcher, TickRunner};
use classbell_store::{FirestoreStore, JsonFileStore, ScheduleStore};

use crate::error::AppResult;

/// ## Summary
/// Builds the HTTP client shared by the store and the push transport.
///
/// ## Errors
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(settings: &Settings) -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.push.send_timeout_secs))
        .build()?)
}

/// ## Summary
/// Resolves the configured default zone.
///
/// ## Errors
/// Returns `CoreError::InvalidConfiguration` if the zone name is unknown.
pub fn default_zone(settings: &Settings) -> AppResult<Tz> {
    let name = &settings.reminders.default_time_zone;
    Ok(name.parse::<Tz>().map_err(|_e| {
        CoreError::InvalidConfiguration(format!("unknown default time zone: {name}"))
    })?)
}

/// ## Summary
/// Builds the schedule store selected by `store.kind`.
///
/// ## Errors
/// Returns `CoreError::InvalidConfiguration` if a required setting is missing.
pub fn build_store(settings: &Settings, http: &reqwest::Client) -> AppResult<Arc<dyn ScheduleStore>> {
    let store = &settings.store;
    match store.kind {
        StoreKind::JsonFile => {
            let path = store
                .path
                .as_deref()
                .ok_or(CoreError::InvariantViolation("store.path validated but missing"))?;
            tracing::info!(%path, "Using JSON file schedule store");
            Ok(Arc::new(JsonFileStore::new(path)))
        }
        StoreKind::Firestore => {
            let project_id = store
                .project_id
                .as_deref()
                .ok_or(CoreError::InvariantViolation("store.project_id validated but missing"))?;
            let access_token = store
                .access_token
                .as_deref()
                .ok_or(CoreError::InvariantViolation("store.access_token validated but missing"))?;
            tracing::info!(%project_id, collection = %store.collection, "Using Firestore schedule store");
            Ok(Arc::new(FirestoreStore::new(
                http.clone(),
                store.base_url.clone(),
                project_id,
                store.collection.clone(),
                access_token,
                store.page_size,
            )))
        }
    }
}

/// ## Summary
/// Builds the push transport selected by `push.kind`.
///
/// ## Errors
/// Returns an error if the FCM transport is missing credentials.
pub fn build_transport(
    settings: &Settings,
    http: &reqwest::Client,
) -> AppResult<Arc<dyn PushTransport>> {
    match settings.push.kind {
        PushKind::Fcm => {
            tracing::info!("Using FCM push transport");
            Ok(Arc::new(FcmTransport::from_config(http.clone(), &settings.push)?))
        }
        PushKind::Log => {
            tracing::info!("Using dry-run push transport, reminders will only be logged");
            Ok(Arc::new(LogTransport::new()))
        }
    }
}

/// ## Summary
/// Wires settings into a ready-to-run [`TickRunner`].
///
/// ## Errors
/// Returns an error if any client cannot be constructed.
pub fn build_runner(settings: &Settings) -> AppResult<TickRunner> {
    let http = build_http_client(settings)?;
    let store = build_store(settings, &http)?;
    let transport = build_transport(settings, &http)?;
    let dispatcher = ReminderDispatcher::new(transport, DispatchConfig::from_settings(settings));

    Ok(TickRunner::new(store, dispatcher, default_zone(settings)?))
}
