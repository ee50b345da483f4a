//! Weekday spellings seen in real schedule documents.

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn accent_and_case_variants_schedule_the_same_day() {
    let documents = ["Miércoles", "MIERCOLES", "miércoles ", "Mie"]
        .iter()
        .enumerate()
        .map(|(n, day)| document(&format!("token-{n}"), vec![class(day, "07:00", "Música")]))
        .collect();
    let harness = Harness::new(documents);

    // Wednesday 2026-10-21 06:50 in Mexico City.
    let result = harness
        .runner
        .run_tick(at("2026-10-21T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.attempted, 4);
    assert_eq!(result.succeeded, 4);
    assert!(
        harness
            .transport
            .delivered()
            .iter()
            .all(|message| message.data["classStartIso"] == "2026-10-21T13:00:00.000Z")
    );
}

#[test_log::test(tokio::test)]
async fn unknown_day_falls_back_to_monday() {
    let harness = Harness::new(vec![document(
        "token-x",
        vec![class("someday", "07:00", "Ética")],
    )]);

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.succeeded, 1);
}

#[test_log::test(tokio::test)]
async fn malformed_start_time_uses_seven_oclock() {
    let harness = Harness::new(vec![document(
        "token-x",
        vec![class("Lunes", "soon", "Ética")],
    )]);

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.succeeded, 1);
    assert_eq!(
        harness.transport.delivered()[0].data["classStartIso"],
        "2026-10-19T13:00:00.000Z"
    );
}
