//! Schedule documents kept in a local JSON file.
//!
//! The file holds either an array of records, each with an `id`, or an
//! object mapping document ids to records.

use std::path::PathBuf;

use classbell_schedule::ScheduleDocument;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::decode::decode_document;
use crate::{ScheduleStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ## Summary
    /// Decodes the file contents into schedule documents.
    ///
    /// ## Errors
    /// Returns an error if the contents are not JSON or the top level is
    /// neither an array nor an object.
    pub fn parse(contents: &str) -> StoreResult<Vec<ScheduleDocument>> {
        let root: Value = serde_json::from_str(contents)?;
        match root {
            Value::Array(records) => Ok(records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    let id = match record.get("id") {
                        Some(Value::String(id)) => id.clone(),
                        Some(Value::Number(id)) => id.to_string(),
                        _ => format!("#{index}"),
                    };
                    decode_document(id, record)
                })
                .collect()),
            Value::Object(records) => Ok(records
                .iter()
                .map(|(id, record)| decode_document(id.clone(), record))
                .collect()),
            _ => Err(StoreError::Decode(
                "expected an array or object of schedule records".to_string(),
            )),
        }
    }
}

impl ScheduleStore for JsonFileStore {
    fn fetch_documents(&self) -> BoxFuture<'_, StoreResult<Vec<ScheduleDocument>>> {
        Box::pin(async move {
            let contents =
                tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|source| StoreError::Io {
                        path: self.path.display().to_string(),
                        source,
                    })?;
            let documents = Self::parse(&contents)?;
            tracing::debug!(
                path = %self.path.display(),
                count = documents.len(),
                "Read schedule documents from file"
            );
            Ok(documents)
        })
    }
}
