//! One tick: read every schedule document, dispatch what is due, report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use classbell_store::ScheduleStore;

use crate::dispatcher::ReminderDispatcher;
use crate::error::{ServiceError, ServiceResult};
use crate::transport::DeliveryError;

/// Outcome of one tick, owned by the caller that ran it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub attempted: usize,
    pub succeeded: usize,
    /// Documents without a token or without classes.
    pub skipped_documents: usize,
    pub failures: Vec<DeliveryFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Leading characters of the recipient handle.
    pub recipient: String,
    pub kind: FailureKind,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Unauthorized,
    Rejected,
    Transport,
    Timeout,
    Other,
}

impl From<&DeliveryError> for FailureKind {
    fn from(error: &DeliveryError) -> Self {
        match error {
            DeliveryError::Unauthorized { .. } => Self::Unauthorized,
            DeliveryError::Rejected { .. } => Self::Rejected,
            DeliveryError::Transport(_) => Self::Transport,
            DeliveryError::Timeout(_) => Self::Timeout,
            DeliveryError::Other(_) => Self::Other,
        }
    }
}

impl TickResult {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when sends were attempted and every one was refused for credentials.
    #[must_use]
    pub fn credentials_rejected(&self) -> bool {
        self.attempted > 0
            && self.succeeded == 0
            && self
                .failures
                .iter()
                .all(|failure| failure.kind == FailureKind::Unauthorized)
    }
}

/// Entry point for externally scheduled ticks.
///
/// Store and transport clients are constructed by the caller and injected.
pub struct TickRunner {
    store: Arc<dyn ScheduleStore>,
    dispatcher: ReminderDispatcher,
    default_zone: Tz,
}

impl std::fmt::Debug for TickRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickRunner")
            .field("dispatcher", &self.dispatcher)
            .field("default_zone", &self.default_zone)
            .finish_non_exhaustive()
    }
}

impl TickRunner {
    #[must_use]
    pub fn new(store: Arc<dyn ScheduleStore>, dispatcher: ReminderDispatcher, default_zone: Tz) -> Self {
        Self {
            store,
            dispatcher,
            default_zone,
        }
    }

    /// ## Summary
    /// Runs one tick at `now`.
    ///
    /// Delivery failures are reported inside the returned `TickResult`.
    ///
    /// ## Errors
    /// Returns an error if the schedule collection cannot be read, or if every
    /// attempted delivery was refused for credentials. No reminder was sent
    /// in either case, so the tick can be retried as a whole.
    #[tracing::instrument(skip(self))]
    pub async fn run_tick(&self, now: DateTime<Utc>) -> ServiceResult<TickResult> {
        let documents = self.store.fetch_documents().await?;
        tracing::info!(count = documents.len(), "Found schedule documents");

        let result = self
            .dispatcher
            .dispatch_tick(&documents, now, self.default_zone)
            .await;

        if result.attempted == 0 {
            tracing::info!(skipped = result.skipped_documents, "No notifications to send this tick");
        } else {
            tracing::info!(
                attempted = result.attempted,
                succeeded = result.succeeded,
                failed = result.failed(),
                skipped = result.skipped_documents,
                "Tick complete"
            );
        }

        if result.credentials_rejected() {
            return Err(ServiceError::TransportUnauthorized {
                attempted: result.attempted,
            });
        }

        Ok(result)
    }
}
