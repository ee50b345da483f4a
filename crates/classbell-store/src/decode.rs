//! Lenient decoding of raw schedule records.
//!
//! Records look like
//! `{ "token", "tz", "classes": [{ "dia", "inicio", "materia", "nombre", "salon" }] }`.
//! Missing or mistyped fields never fail a record: non-string text fields are
//! treated as absent, a non-array `classes` as no classes, and non-object
//! class entries are dropped.

use classbell_schedule::{ClassEntry, ScheduleDocument};
use serde_json::{Map, Value};

/// ## Summary
/// Builds a [`ScheduleDocument`] from one raw record.
#[must_use]
pub fn decode_document(identifier: impl Into<String>, record: &Value) -> ScheduleDocument {
    let identifier = identifier.into();
    let Some(fields) = record.as_object() else {
        tracing::debug!(id = %identifier, "Schedule record is not an object");
        return ScheduleDocument {
            identifier,
            ..ScheduleDocument::default()
        };
    };

    let class_entries = match fields.get("classes") {
        Some(Value::Array(entries)) => entries.iter().filter_map(decode_class_entry).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            tracing::debug!(id = %identifier, "Schedule record has non-array classes");
            Vec::new()
        }
    };

    ScheduleDocument {
        recipient_handle: text(fields, "token"),
        time_zone: text(fields, "tz"),
        class_entries,
        identifier,
    }
}

fn decode_class_entry(value: &Value) -> Option<ClassEntry> {
    let fields = value.as_object()?;
    Some(ClassEntry {
        day_text: text(fields, "dia"),
        start_time_text: text(fields, "inicio"),
        subject_label: text(fields, "materia"),
        name_label: text(fields, "nombre"),
        room_label: text(fields, "salon"),
    })
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}
