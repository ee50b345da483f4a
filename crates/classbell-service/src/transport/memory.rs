use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;

use super::{DeliveryError, PushTransport};
use crate::message::OutboundMessage;

/// In-process transport that records every accepted message.
///
/// Recipients can be marked as rejecting, unauthorized or hanging to
/// exercise the dispatcher's failure handling.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    delivered: Mutex<Vec<OutboundMessage>>,
    rejecting: HashSet<String>,
    unauthorized: HashSet<String>,
    hanging: HashSet<String>,
    hang_for: Option<Duration>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages to `recipient` fail with an `UNREGISTERED` rejection.
    #[must_use]
    pub fn rejecting(mut self, recipient: impl Into<String>) -> Self {
        self.rejecting.insert(recipient.into());
        self
    }

    /// Messages to `recipient` fail as unauthorized.
    #[must_use]
    pub fn unauthorized(mut self, recipient: impl Into<String>) -> Self {
        self.unauthorized.insert(recipient.into());
        self
    }

    /// Messages to `recipient` wait `delay` before being accepted.
    #[must_use]
    pub fn hanging(mut self, recipient: impl Into<String>, delay: Duration) -> Self {
        self.hanging.insert(recipient.into());
        self.hang_for = Some(delay);
        self
    }

    #[must_use]
    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PushTransport for MemoryTransport {
    fn send<'a>(&'a self, message: &'a OutboundMessage) -> BoxFuture<'a, Result<String, DeliveryError>> {
        Box::pin(async move {
            if self.hanging.contains(&message.recipient) {
                if let Some(delay) = self.hang_for {
                    tokio::time::sleep(delay).await;
                }
            }
            if self.unauthorized.contains(&message.recipient) {
                return Err(DeliveryError::Unauthorized { status: 401 });
            }
            if self.rejecting.contains(&message.recipient) {
                return Err(DeliveryError::Rejected {
                    status: 404,
                    code: "UNREGISTERED".to_string(),
                });
            }

            let mut delivered = self.delivered.lock().unwrap_or_else(PoisonError::into_inner);
            delivered.push(message.clone());
            Ok(format!("memory-{}", delivered.len()))
        })
    }
}
