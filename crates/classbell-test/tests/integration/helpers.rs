#![allow(clippy::expect_used, dead_code)]
//! Shared setup for tick integration tests.
//!
//! Every runner is built over a `MemoryStore` and a `MemoryTransport`, with
//! Mexico City as the default zone and lead times of 10 and 5 minutes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use classbell_test::component::schedule::ScheduleDocument;
use classbell_test::component::service::transport::MemoryTransport;
use classbell_test::component::service::{DispatchConfig, ReminderDispatcher, TickRunner};
use classbell_test::component::store::{MemoryStore, ScheduleStore};

pub use classbell_test::fixture::{class, document};

pub const DEFAULT_ZONE: Tz = Tz::America__Mexico_City;

/// Parses an RFC 3339 instant.
pub fn at(instant: &str) -> DateTime<Utc> {
    instant
        .parse::<DateTime<Utc>>()
        .expect("valid RFC 3339 instant")
}

/// Runner plus a handle on its transport for inspecting deliveries.
pub struct Harness {
    pub runner: TickRunner,
    pub transport: Arc<MemoryTransport>,
}

impl Harness {
    pub fn new(documents: Vec<ScheduleDocument>) -> Self {
        Self::with_transport(documents, MemoryTransport::new())
    }

    pub fn with_transport(documents: Vec<ScheduleDocument>, transport: MemoryTransport) -> Self {
        Self::with_store(Arc::new(MemoryStore::new(documents)), transport)
    }

    pub fn with_store(store: Arc<dyn ScheduleStore>, transport: MemoryTransport) -> Self {
        let transport = Arc::new(transport);
        let dispatcher = ReminderDispatcher::new(transport.clone(), DispatchConfig::default());

        Self {
            runner: TickRunner::new(store, dispatcher, DEFAULT_ZONE),
            transport,
        }
    }
}
