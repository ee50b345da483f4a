use classbell_schedule::ScheduleDocument;
use futures::future::BoxFuture;

use crate::{ScheduleStore, StoreResult};

/// Fixed in-process document set.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<ScheduleDocument>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(documents: Vec<ScheduleDocument>) -> Self {
        Self { documents }
    }
}

impl ScheduleStore for MemoryStore {
    fn fetch_documents(&self) -> BoxFuture<'_, StoreResult<Vec<ScheduleDocument>>> {
        Box::pin(async move { Ok(self.documents.clone()) })
    }
}
