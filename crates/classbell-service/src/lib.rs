//! Reminder planning, delivery and the per-tick entry point.

pub mod dispatcher;
pub mod error;
pub mod message;
pub mod tick;
pub mod transport;

pub use dispatcher::{DispatchConfig, PlannedReminder, ReminderDispatcher};
pub use error::{ServiceError, ServiceResult};
pub use message::{MessageOptions, OutboundMessage};
pub use tick::{DeliveryFailure, FailureKind, TickResult, TickRunner};
pub use transport::{DeliveryError, PushTransport};
