//! Shared fixtures for service-level tests.

use crate::llm_service::{LlmService, LlmServiceFactory, MockLlmService};
use crate::qa::QaService;
use crate::repository::{DocumentRepository, InMemoryDocumentRepository};
use crate::service::DocumentService;
use crate::storage::FileStorage;
use docqa_core::{CacheSettings, DocumentCategory};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// LLM service that counts calls and records what it was asked.
pub struct CountingLlmService {
    category: DocumentCategory,
    classifications: AtomicUsize,
    answers: AtomicUsize,
    last_context: Mutex<Option<String>>,
    last_category: Mutex<Option<DocumentCategory>>,
}

impl CountingLlmService {
    pub fn classifying_as(category: DocumentCategory) -> Arc<Self> {
        Arc::new(Self {
            category,
            classifications: AtomicUsize::new(0),
            answers: AtomicUsize::new(0),
            last_context: Mutex::new(None),
            last_category: Mutex::new(None),
        })
    }

    pub fn classification_calls(&self) -> usize {
        self.classifications.load(Ordering::SeqCst)
    }

    pub fn answer_calls(&self) -> usize {
        self.answers.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<String> {
        self.last_context.lock().unwrap().clone()
    }

    pub fn last_category(&self) -> Option<DocumentCategory> {
        *self.last_category.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl LlmService for CountingLlmService {
    fn provider_name(&self) -> &str {
        "counting"
    }

    async fn identify_document_type(&self, _file_name: &str, _content: &str) -> DocumentCategory {
        self.classifications.fetch_add(1, Ordering::SeqCst);
        self.category
    }

    async fn answer_question(
        &self,
        question: &str,
        document_context: &str,
        category: DocumentCategory,
    ) -> String {
        let n = self.answers.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_context.lock().unwrap() = Some(document_context.to_string());
        *self.last_category.lock().unwrap() = Some(category);
        format!("answer #{} to {}", n, question)
    }
}

/// Document and QA services over an in-memory repository and temp storage.
pub struct Harness {
    _temp: TempDir,
    pub storage: FileStorage,
    pub llm: Arc<CountingLlmService>,
    pub qa: Arc<QaService>,
    pub documents: DocumentService,
}

impl Harness {
    /// Services whose active provider is the counting fake.
    pub fn new(category: DocumentCategory) -> Self {
        let llm = CountingLlmService::classifying_as(category);
        Self::with_provider("openai", llm)
    }

    /// Services whose active provider is the offline mock.
    pub fn with_mock_provider() -> Self {
        let llm = CountingLlmService::classifying_as(DocumentCategory::Undefined);
        Self::with_provider("mock", llm)
    }

    fn with_provider(provider: &str, llm: Arc<CountingLlmService>) -> Self {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        let repository: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());

        let remote: Arc<dyn LlmService> = llm.clone();
        let factory = Arc::new(LlmServiceFactory::new(
            provider,
            Arc::new(MockLlmService::new()),
            remote,
        ));

        let qa = Arc::new(QaService::new(
            Arc::clone(&repository),
            storage.clone(),
            Arc::clone(&factory),
            CacheSettings::default(),
        ));

        let documents = DocumentService::new(repository, storage.clone(), factory, Arc::clone(&qa));

        Self {
            _temp: temp,
            storage,
            llm,
            qa,
            documents,
        }
    }
}
