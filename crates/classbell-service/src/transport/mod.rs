//! Push delivery collaborators.
//!
//! A transport submits one [`OutboundMessage`] and reports the outcome for
//! that message alone; the dispatcher decides what a failure means for the
//! tick.

use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::message::OutboundMessage;

pub mod fcm;
pub mod log;
pub mod memory;

pub use fcm::FcmTransport;
pub use log::LogTransport;
pub use memory::MemoryTransport;

/// Failure delivering a single message.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Unauthorized (status {status})")]
    Unauthorized { status: u16 },

    #[error("Rejected with status {status}: {code}")]
    Rejected { status: u16, code: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Delivery failed: {0}")]
    Other(String),
}

pub trait PushTransport: Send + Sync {
    /// ## Summary
    /// Submits one message for delivery and returns the transport's message id.
    ///
    /// ## Errors
    /// Returns a `DeliveryError` describing why this message was not accepted.
    fn send<'a>(&'a self, message: &'a OutboundMessage) -> BoxFuture<'a, Result<String, DeliveryError>>;
}
