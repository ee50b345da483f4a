//! Ticks driven by a JSON schedule file, wired the way the binary wires them.

use std::io::Write;

use classbell_test::component::bootstrap::{build_http_client, build_runner, build_store};
use classbell_test::component::config::{Settings, StoreKind};
use classbell_test::component::service::transport::MemoryTransport;

use super::helpers::*;

const SCHEDULES: &str = r#"[
    {
        "id": "alumno-1",
        "token": "token-file",
        "classes": [
            { "dia": "Lunes", "inicio": "07:00", "materia": "Cálculo", "salon": "A1" },
            { "dia": "Viernes", "inicio": "12:00", "nombre": "Taller" }
        ]
    },
    { "id": "alumno-2", "classes": [ { "dia": "Lunes", "inicio": "07:00" } ] },
    { "id": "alumno-3", "token": "token-bad", "classes": "not a list" }
]"#;

fn schedule_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SCHEDULES.as_bytes()).expect("write schedules");
    file
}

fn settings_for(path: &std::path::Path) -> Settings {
    let mut settings = Settings::load(None).expect("default settings");
    settings.store.kind = StoreKind::JsonFile;
    settings.store.path = Some(path.display().to_string());
    settings
}

#[test_log::test(tokio::test)]
async fn json_file_documents_flow_through_tick() {
    let file = schedule_file();
    let settings = settings_for(file.path());

    let http = build_http_client(&settings).expect("http client");
    let store = build_store(&settings, &http).expect("store");
    let harness = Harness::with_store(store, MemoryTransport::new());

    let result = harness
        .runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    // alumno-2 has no token and alumno-3 decodes with no classes.
    assert_eq!(result.skipped_documents, 2);
    assert_eq!(result.succeeded, 1);

    let delivered = harness.transport.delivered();
    assert_eq!(delivered[0].recipient, "token-file");
    assert_eq!(delivered[0].body, "Empieza a las 07:00 • Salón A1");
}

#[test_log::test(tokio::test)]
async fn bootstrapped_runner_uses_dry_run_transport() {
    let file = schedule_file();
    let settings = settings_for(file.path());

    let runner = build_runner(&settings).expect("runner");
    let result = runner
        .run_tick(at("2026-10-19T12:50:00Z"))
        .await
        .expect("tick succeeds");

    assert_eq!(result.attempted, 1);
    assert_eq!(result.succeeded, 1);
}

#[test_log::test(tokio::test)]
async fn missing_file_fails_the_tick() {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = settings_for(&dir.path().join("absent.json"));

    let http = build_http_client(&settings).expect("http client");
    let store = build_store(&settings, &http).expect("store");
    let harness = Harness::with_store(store, MemoryTransport::new());

    assert!(
        harness
            .runner
            .run_tick(at("2026-10-19T12:50:00Z"))
            .await
            .is_err()
    );
    assert!(harness.transport.delivered().is_empty());
}
