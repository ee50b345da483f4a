//! Fans due reminders out to their recipients.
//!
//! Planning is synchronous: every document, class entry and lead time is
//! evaluated against `now`. Delivery runs each planned send as its own task
//! and merges outcomes only after all of them finished, so one recipient's
//! failure (or panic) never stops the others.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use classbell_core::config::Settings;
use classbell_core::constants::{DEFAULT_LEAD_TIMES, DEFAULT_SEND_TIMEOUT_SECS};
use classbell_schedule::{ReminderWindow, ScheduleDocument, ZoneResolver, next_occurrence};

use crate::message::{MessageOptions, OutboundMessage};
use crate::tick::{DeliveryFailure, FailureKind, TickResult};
use crate::transport::{DeliveryError, PushTransport};

/// Tuning shared by every tick of a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Minutes before class start at which reminders fire.
    pub lead_times: Vec<u32>,
    pub window: ReminderWindow,
    pub message: MessageOptions,
    /// Upper bound for one send; exceeding it counts as a failed delivery.
    pub send_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            lead_times: DEFAULT_LEAD_TIMES.to_vec(),
            window: ReminderWindow::default(),
            message: MessageOptions::default(),
            send_timeout: Duration::from_secs(u64::from(DEFAULT_SEND_TIMEOUT_SECS)),
        }
    }
}

impl DispatchConfig {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            lead_times: settings.reminders.lead_times.clone(),
            window: ReminderWindow::new(
                settings.reminders.grace_minutes,
                settings.reminders.early_minutes,
            ),
            message: MessageOptions {
                ttl: Duration::from_secs(u64::from(settings.push.ttl_minutes) * 60),
                android_channel_id: settings.push.android_channel_id.clone(),
            },
            send_timeout: Duration::from_secs(settings.push.send_timeout_secs),
        }
    }
}

/// One reminder that is due on this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReminder {
    pub document_id: String,
    /// Position of the class entry within its document.
    pub entry_index: usize,
    pub minutes_before: u32,
    pub occurrence: DateTime<Tz>,
    pub message: OutboundMessage,
}

/// Due reminders for one tick plus the number of documents skipped outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub reminders: Vec<PlannedReminder>,
    pub skipped_documents: usize,
}

pub struct ReminderDispatcher {
    transport: Arc<dyn PushTransport>,
    config: DispatchConfig,
}

impl std::fmt::Debug for ReminderDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReminderDispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn PushTransport>, config: DispatchConfig) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// ## Summary
    /// Decides which reminders are due at `now`.
    ///
    /// Documents without a recipient handle or without class entries are
    /// skipped; they are counted but are not failures.
    #[must_use]
    pub fn plan(&self, documents: &[ScheduleDocument], now: DateTime<Utc>, default_zone: Tz) -> Plan {
        let mut zones = ZoneResolver::new(default_zone);
        let mut plan = Plan::default();

        for document in documents {
            let Some(recipient) = document.recipient() else {
                tracing::debug!(id = %document.identifier, "Document has no token, skipping");
                plan.skipped_documents += 1;
                continue;
            };
            if document.class_entries.is_empty() {
                tracing::debug!(recipient = %recipient_prefix(recipient), "Document has no classes, skipping");
                plan.skipped_documents += 1;
                continue;
            }

            let zone = zones.resolve_or_default(document.time_zone.as_deref());

            for (entry_index, entry) in document.class_entries.iter().enumerate() {
                let occurrence = next_occurrence(entry.weekday(), entry.start_time(), zone, now);

                for minutes_before in
                    self.config
                        .window
                        .due_lead_times(&occurrence, &self.config.lead_times, now)
                {
                    tracing::debug!(
                        recipient = %recipient_prefix(recipient),
                        entry_index,
                        minutes_before,
                        occurrence = %occurrence,
                        zone = %zone,
                        "Reminder due"
                    );
                    plan.reminders.push(PlannedReminder {
                        document_id: document.identifier.clone(),
                        entry_index,
                        minutes_before,
                        message: OutboundMessage::class_reminder(
                            recipient,
                            entry,
                            &occurrence,
                            minutes_before,
                            &self.config.message,
                        ),
                        occurrence,
                    });
                }
            }
        }

        plan
    }

    /// ## Summary
    /// Plans and delivers every reminder due at `now`.
    ///
    /// All sends run concurrently and are awaited before returning. Each
    /// failure is recorded in the result; none aborts the batch.
    #[tracing::instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn dispatch_tick(
        &self,
        documents: &[ScheduleDocument],
        now: DateTime<Utc>,
        default_zone: Tz,
    ) -> TickResult {
        let plan = self.plan(documents, now, default_zone);
        let mut result = self.deliver(plan.reminders).await;
        result.skipped_documents = plan.skipped_documents;
        result
    }

    /// ## Summary
    /// Sends planned reminders, each in its own task, and merges the outcomes.
    pub async fn deliver(&self, reminders: Vec<PlannedReminder>) -> TickResult {
        let send_timeout = self.config.send_timeout;

        let handles: Vec<_> = reminders
            .into_iter()
            .map(|reminder| {
                let transport = Arc::clone(&self.transport);
                let recipient = reminder.message.recipient.clone();
                let handle = tokio::spawn(async move {
                    let message = reminder.message;
                    match tokio::time::timeout(send_timeout, transport.send(&message)).await {
                        Ok(outcome) => outcome,
                        Err(_elapsed) => Err(DeliveryError::Timeout(send_timeout)),
                    }
                });
                (recipient, handle)
            })
            .collect();

        let (recipients, handles): (Vec<String>, Vec<_>) = handles.into_iter().unzip();
        let outcomes = futures::future::join_all(handles).await;

        let mut result = TickResult {
            attempted: outcomes.len(),
            ..TickResult::default()
        };

        for (recipient, outcome) in recipients.into_iter().zip(outcomes) {
            let failure = match outcome {
                Ok(Ok(message_id)) => {
                    tracing::trace!(recipient = %recipient_prefix(&recipient), %message_id, "Reminder delivered");
                    result.succeeded += 1;
                    continue;
                }
                Ok(Err(e)) => DeliveryFailure {
                    recipient: recipient_prefix(&recipient),
                    kind: FailureKind::from(&e),
                    error: e.to_string(),
                },
                Err(join_error) => DeliveryFailure {
                    recipient: recipient_prefix(&recipient),
                    kind: FailureKind::Other,
                    error: format!("delivery task failed: {join_error}"),
                },
            };
            tracing::warn!(recipient = %failure.recipient, error = %failure.error, "Reminder delivery failed");
            result.failures.push(failure);
        }

        result
    }
}

/// First 12 characters of a recipient handle, for logs and failure reports.
#[must_use]
pub fn recipient_prefix(recipient: &str) -> String {
    recipient.chars().take(12).collect()
}
