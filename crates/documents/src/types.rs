//! Document type definitions.

use chrono::{DateTime, Utc};
use docqa_core::DocumentCategory;
use serde::{Deserialize, Serialize};

/// An uploaded document.
///
/// The category is assigned once at upload time and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Repository-assigned identifier
    pub id: i64,

    /// Display name (file name without its last extension)
    pub name: String,

    pub category: DocumentCategory,

    /// Original file name; its extension selects the extraction strategy
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Storage reference, relative to the storage root
    #[serde(rename = "filePath")]
    pub file_path: String,

    #[serde(rename = "uploadedBy")]
    pub uploaded_by: String,

    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

/// A document that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub category: DocumentCategory,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

impl NewDocument {
    /// Attach the identifier assigned by a repository.
    pub fn into_document(self, id: i64) -> Document {
        Document {
            id,
            name: self.name,
            category: self.category,
            file_name: self.file_name,
            file_path: self.file_path,
            uploaded_by: self.uploaded_by,
            uploaded_at: self.uploaded_at,
        }
    }
}
