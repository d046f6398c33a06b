//! Question answering over stored documents.

use crate::cache::{AnswerCache, CacheStats};
use crate::extract::extract_file;
use crate::llm_service::LlmServiceFactory;
use crate::normalizer::cache_key;
use crate::repository::DocumentRepository;
use crate::storage::FileStorage;
use crate::types::Document;
use docqa_core::{AppError, AppResult, CacheSettings};
use std::sync::Arc;

/// Answers questions about documents, caching answers per normalized question.
pub struct QaService {
    repository: Arc<dyn DocumentRepository>,
    storage: FileStorage,
    llm: Arc<LlmServiceFactory>,
    cache: AnswerCache,
}

impl QaService {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        storage: FileStorage,
        llm: Arc<LlmServiceFactory>,
        cache_settings: CacheSettings,
    ) -> Self {
        Self {
            repository,
            storage,
            llm,
            cache: AnswerCache::new(cache_settings),
        }
    }

    /// Answer a question about a document.
    ///
    /// A cached answer for the same document and normalized question is
    /// returned without touching the file or the provider. Otherwise the
    /// document text is extracted, the active provider is asked and the
    /// answer is cached.
    ///
    /// # Errors
    /// - `AppError::DocumentNotFound` if no document has this id
    /// - `AppError::Processing` if the stored file is missing or unreadable;
    ///   nothing is cached in that case
    pub async fn answer_question(&self, document_id: i64, question: &str) -> AppResult<String> {
        let document = self
            .repository
            .find_by_id(document_id)?
            .ok_or(AppError::DocumentNotFound(document_id))?;

        let key = cache_key(document_id, question);
        if let Some(answer) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(answer);
        }

        tracing::info!(
            "Answering question for document {} ({}): {}",
            document.id,
            document.category,
            question
        );

        let path = self.storage.resolve(&document.file_path);
        let content = extract_file(&path, &document.file_name)?;
        let context = build_document_context(&document, &content);

        let service = self.llm.get_service();
        let answer = service
            .answer_question(question, &context, document.category)
            .await;

        self.cache.insert(key, answer.clone());
        Ok(answer)
    }

    /// Drop every cached answer. Must be called whenever a document is deleted.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Context block handed to the provider: title line, blank line, then the
/// content between `---` markers.
pub fn build_document_context(document: &Document, content: &str) -> String {
    format!(
        "Document Title: {}\n\nDocument Content:\n---\n{}\n---\n",
        document.name, content
    )
}
