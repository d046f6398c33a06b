//! Document classification and question answering.
//!
//! Uploaded files are stored on disk, classified once into a
//! [`DocumentCategory`](docqa_core::DocumentCategory) and can then be
//! questioned through [`QaService`]. Answers are cached per document and
//! normalized question; deleting any document clears the whole cache.

pub mod cache;
pub mod classifier;
pub mod extract;
pub mod llm_service;
pub mod normalizer;
pub mod qa;
pub mod repository;
pub mod service;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use cache::{AnswerCache, CacheStats};
pub use classifier::classify_by_keywords;
pub use extract::{extract_bytes, extract_file, ContentKind};
pub use llm_service::{LlmService, LlmServiceFactory, MockLlmService, RemoteLlmService};
pub use normalizer::{cache_key, normalize};
pub use qa::{build_document_context, QaService};
pub use repository::{DocumentRepository, InMemoryDocumentRepository, SqliteDocumentRepository};
pub use service::DocumentService;
pub use storage::{content_type, document_name, FileStorage};
pub use types::{Document, NewDocument};
