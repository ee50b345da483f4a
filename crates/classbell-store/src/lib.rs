//! Schedule document sources.
//!
//! The store is an external collaborator: the tick only needs an enumerable
//! collection of [`ScheduleDocument`]s. Failing to read the collection as a
//! whole is fatal for the tick; malformed individual records are not.

use classbell_schedule::ScheduleDocument;
use futures::future::BoxFuture;

pub mod decode;
pub mod error;
pub mod firestore;
pub mod json_file;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use firestore::FirestoreStore;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub trait ScheduleStore: Send + Sync {
    /// ## Summary
    /// Reads every schedule document in the collection.
    ///
    /// ## Errors
    /// Returns an error if the collection cannot be read at all.
    fn fetch_documents(&self) -> BoxFuture<'_, StoreResult<Vec<ScheduleDocument>>>;
}
