//! Document lifecycle: upload, lookup, download and deletion.

use crate::extract::extract_bytes;
use crate::llm_service::LlmServiceFactory;
use crate::qa::QaService;
use crate::repository::{DocumentRepository, SqliteDocumentRepository};
use crate::storage::{content_type, document_name, FileStorage};
use crate::types::{Document, NewDocument};
use chrono::Utc;
use docqa_core::{AppConfig, AppError, AppResult, DocumentCategory};
use std::path::PathBuf;
use std::sync::Arc;

pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    storage: FileStorage,
    llm: Arc<LlmServiceFactory>,
    qa: Arc<QaService>,
}

impl DocumentService {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        storage: FileStorage,
        llm: Arc<LlmServiceFactory>,
        qa: Arc<QaService>,
    ) -> Self {
        Self {
            repository,
            storage,
            llm,
            qa,
        }
    }

    /// Wire the SQLite repository, workspace storage and configured LLM
    /// services together.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.ensure_data_dir()?;

        let repository: Arc<dyn DocumentRepository> =
            Arc::new(SqliteDocumentRepository::open(&config.database_path())?);
        let storage = FileStorage::new(config.data_dir());
        let llm = Arc::new(LlmServiceFactory::from_config(config));
        let qa = Arc::new(QaService::new(
            Arc::clone(&repository),
            storage.clone(),
            Arc::clone(&llm),
            config.cache,
        ));

        Ok(Self::new(repository, storage, llm, qa))
    }

    pub fn qa(&self) -> &Arc<QaService> {
        &self.qa
    }

    /// Store and classify a new document.
    ///
    /// The category is decided here once and never changes afterwards.
    ///
    /// # Errors
    /// - `AppError::Processing` for a blank file name or uploader, or if the
    ///   file cannot be stored
    /// - `AppError::DocumentAlreadyExists` if the file name was already uploaded
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        uploaded_by: &str,
    ) -> AppResult<Document> {
        if file_name.trim().is_empty() {
            return Err(AppError::Processing("File name is required".to_string()));
        }
        if uploaded_by.trim().is_empty() {
            return Err(AppError::Processing("Uploader is required".to_string()));
        }

        if self.repository.exists_by_file_name(file_name)? {
            return Err(AppError::DocumentAlreadyExists(file_name.to_string()));
        }

        let file_path = self.storage.save(file_name, bytes)?;
        let category = self.identify_document_type(file_name, bytes).await;

        let new_document = NewDocument {
            name: document_name(file_name),
            category,
            file_name: file_name.to_string(),
            file_path: file_path.clone(),
            uploaded_by: uploaded_by.to_string(),
            uploaded_at: Utc::now(),
        };

        match self.repository.save(new_document) {
            Ok(document) => {
                tracing::info!(
                    "Uploaded document {} '{}' as {}",
                    document.id,
                    document.file_name,
                    document.category
                );
                Ok(document)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&file_path) {
                    tracing::warn!("Failed to remove orphaned upload: {}", cleanup);
                }
                Err(e)
            }
        }
    }

    /// Classify raw file content with the active provider. Never fails.
    pub async fn identify_document_type(&self, file_name: &str, bytes: &[u8]) -> DocumentCategory {
        let content = extract_bytes(file_name, bytes);
        self.llm
            .get_service()
            .identify_document_type(file_name, &content)
            .await
    }

    pub fn list(&self) -> AppResult<Vec<Document>> {
        self.repository.find_all()
    }

    pub fn get(&self, id: i64) -> AppResult<Document> {
        self.repository
            .find_by_id(id)?
            .ok_or(AppError::DocumentNotFound(id))
    }

    /// Locate a document's stored file and its content type.
    pub fn download(&self, id: i64) -> AppResult<(PathBuf, &'static str)> {
        let document = self.get(id)?;
        let path = self.storage.resolve(&document.file_path);

        if !path.exists() {
            return Err(AppError::Processing(format!(
                "File not found for document {}: {}",
                id, document.file_path
            )));
        }

        Ok((path, content_type(&document.file_name)))
    }

    /// Delete a document, its stored file and every cached answer.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let document = self.get(id)?;

        if let Err(e) = self.storage.delete(&document.file_path) {
            tracing::warn!("Could not delete file for document {}: {}", id, e);
        }

        self.repository.delete(id)?;

        // Evict after the record is gone so an in-flight answer cannot survive
        self.qa.invalidate_all();
        tracing::info!("Deleted document {} '{}'", id, document.file_name);

        Ok(())
    }
}
