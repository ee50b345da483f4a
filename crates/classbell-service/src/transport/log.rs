use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use super::{DeliveryError, PushTransport};
use crate::dispatcher::recipient_prefix;
use crate::message::OutboundMessage;

/// Dry-run transport: logs each message instead of delivering it.
#[derive(Debug, Default)]
pub struct LogTransport {
    sent: AtomicUsize,
}

impl LogTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl PushTransport for LogTransport {
    fn send<'a>(&'a self, message: &'a OutboundMessage) -> BoxFuture<'a, Result<String, DeliveryError>> {
        Box::pin(async move {
            let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::info!(
                recipient = %recipient_prefix(&message.recipient),
                title = %message.title,
                body = %message.body,
                data = ?message.data,
                "Dry run: reminder not delivered"
            );
            Ok(format!("dry-run-{n}"))
        })
    }
}
