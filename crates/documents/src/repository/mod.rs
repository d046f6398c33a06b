//! Document persistence.

mod memory;
mod sqlite;

pub use memory::InMemoryDocumentRepository;
pub use sqlite::SqliteDocumentRepository;

use crate::types::{Document, NewDocument};
use docqa_core::AppResult;

/// Store of document records.
///
/// Absent ids are reported as `Ok(None)` / `Ok(false)`; deciding whether that
/// is a Not-Found error is left to the caller.
pub trait DocumentRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Option<Document>>;

    /// All documents, ordered by id.
    fn find_all(&self) -> AppResult<Vec<Document>>;

    fn exists_by_file_name(&self, file_name: &str) -> AppResult<bool>;

    /// Persist a new record and return it with its assigned id.
    ///
    /// # Errors
    /// `AppError::DocumentAlreadyExists` if the file name is taken.
    fn save(&self, document: NewDocument) -> AppResult<Document>;

    /// Remove a record. Returns whether a record was removed.
    fn delete(&self, id: i64) -> AppResult<bool>;
}
