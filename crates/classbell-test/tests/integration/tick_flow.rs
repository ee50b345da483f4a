//! End-to-end ticks over an in-memory store and transport.
//!
//! Tests:
//! - A Monday 07:00 class in Mexico City gets its 10 minute reminder
//! - Documents without classes or tokens are skipped quietly
//! - One failing recipient does not affect the others
//! - Ticks two minutes apart both send (no cross-tick dedup)
//! - A document's own zone overrides the default
//! - A tick where every send is refused for credentials fails as a whole
//! - Minutes in the start time carry through to the payload

use std::sync::Arc;

use classbell_test::component::service::transport::MemoryTransport;
use classbell_test::component::service::{FailureKind, ServiceError};
use classbell_test::component::store::ScheduleStore;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn monday_class_in_mexico_city_gets_ten_minute_reminder() {
    let mut entry = class("Lunes", "07:00", "Matemáticas");
    entry.room_label = Some("B2".to_string());
    let harness = Harness::new(vec![document("token-monday", vec![entry])]);

    // Monday 2026-10-19 06:50 in Mexico City (UTC-6).
    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.attempted, 1);
    assert_eq!(result.succeeded, 1);
    assert!(result.failures.is_empty());

    let delivered = harness.transport.delivered();
    assert_eq!(delivered.len(), 1);
    let message = &delivered[0];
    assert_eq!(message.recipient, "token-monday");
    assert_eq!(message.title, "Clase: Matemáticas");
    assert_eq!(message.body, "Empieza a las 07:00 • Salón B2");
    assert_eq!(message.data["minutesBefore"], "10");
    assert_eq!(message.data["classStartIso"], "2026-10-19T13:00:00.000Z");
}

#[test_log::test(tokio::test)]
async fn five_minute_reminder_follows_later() {
    let harness = Harness::new(vec![document(
        "token-monday",
        vec![class("lunes", "7:00", "Historia")],
    )]);

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:55:00Z"))
        .await
        .expect("tick succeeds");

    // Both lead times are inside their windows at T-5.
    assert_eq!(result.attempted, 2);
    let mut leads: Vec<_> = harness
        .transport
        .delivered()
        .into_iter()
        .map(|message| message.data["minutesBefore"].clone())
        .collect();
    leads.sort();
    assert_eq!(leads, vec!["10".to_string(), "5".to_string()]);
}

#[test_log::test(tokio::test)]
async fn documents_without_classes_or_token_are_skipped() {
    let mut tokenless = document("unused", vec![class("Lunes", "07:00", "Arte")]);
    tokenless.recipient_handle = None;
    let harness = Harness::new(vec![document("token-empty", Vec::new()), tokenless]);

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.attempted, 0);
    assert_eq!(result.skipped_documents, 2);
    assert!(result.failures.is_empty());
    assert!(harness.transport.delivered().is_empty());
}

#[test_log::test(tokio::test)]
async fn one_rejected_recipient_does_not_block_others() {
    let documents = (1..=5)
        .map(|n| document(&format!("token-{n}"), vec![class("Lunes", "07:00", "Física")]))
        .collect();
    let harness = Harness::with_transport(documents, MemoryTransport::new().rejecting("token-3"));

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("partial failure is not fatal");

    assert_eq!(result.attempted, 5);
    assert_eq!(result.succeeded, 4);
    assert_eq!(result.failed(), 1);
    assert_eq!(result.failures[0].recipient, "token-3");
    assert_eq!(result.failures[0].kind, FailureKind::Rejected);

    let mut recipients: Vec<_> = harness
        .transport
        .delivered()
        .into_iter()
        .map(|message| message.recipient)
        .collect();
    recipients.sort();
    assert_eq!(recipients, vec!["token-1", "token-2", "token-4", "token-5"]);
}

#[test_log::test(tokio::test)]
async fn ticks_inside_same_window_both_send() {
    let harness = Harness::new(vec![document(
        "token-twice",
        vec![class("Lunes", "07:00", "Química")],
    )]);

    let first = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("first tick");
    let second = harness
        .runner
        .run_tick(at("2026-10-19T12:52:00Z"))
        .await
        .expect("second tick");

    assert_eq!(first.succeeded, 1);
    assert_eq!(second.succeeded, 1);

    let delivered = harness.transport.delivered();
    assert_eq!(delivered.len(), 2);
    assert!(delivered.iter().all(|message| message.data["minutesBefore"] == "10"));
}

#[test_log::test(tokio::test)]
async fn document_zone_overrides_default() {
    let mut doc = document("token-ny", vec![class("Lunes", "08:00", "Inglés")]);
    doc.time_zone = Some("America/New_York".to_string());
    let harness = Harness::new(vec![doc]);

    // 08:00 EDT is 12:00 UTC, an hour before the same wall time in Mexico City.
    let result = harness
        .runner
        .run_tick(at("2026-10-19T11:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.succeeded, 1);
    assert_eq!(
        harness.transport.delivered()[0].data["classStartIso"],
        "2026-10-19T12:00:00.000Z"
    );
}

#[test_log::test(tokio::test)]
async fn all_unauthorized_fails_the_tick() {
    let documents = vec![
        document("token-a", vec![class("Lunes", "07:00", "Arte")]),
        document("token-b", vec![class("Lunes", "07:00", "Arte")]),
    ];
    let harness = Harness::with_transport(
        documents,
        MemoryTransport::new().unauthorized("token-a").unauthorized("token-b"),
    );

    let err = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect_err("credentials refused");

    assert!(matches!(err, ServiceError::TransportUnauthorized { attempted: 2 }));
}

#[test_log::test(tokio::test)]
async fn half_past_start_time_is_honoured() {
    let documents = vec![document("token-a", vec![class("Martes", "09:30", "Biología")])];
    let store: Arc<dyn ScheduleStore> =
        Arc::new(classbell_test::component::store::MemoryStore::new(documents));
    let harness = Harness::with_store(store, MemoryTransport::new());

    // Tuesday 09:20 local, Mexico City.
    let result = harness
        .runner
        .run_tick(at("2026-10-20T15:20:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.succeeded, 1);
    assert_eq!(
        harness.transport.delivered()[0].data["classStartIso"],
        "2026-10-20T15:30:00.000Z"
    );
}
