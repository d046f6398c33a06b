//! Deterministic offline LLM service.
//!
//! Classification uses the keyword tables and answers are a fixed template,
//! so the system works without network access or credentials.

use crate::classifier::classify_by_keywords;
use crate::llm_service::LlmService;
use docqa_core::DocumentCategory;

#[derive(Debug, Default)]
pub struct MockLlmService;

impl MockLlmService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn identify_document_type(&self, file_name: &str, content: &str) -> DocumentCategory {
        let category = classify_by_keywords(file_name, content);
        tracing::info!("Mock classification of '{}': {}", file_name, category);
        category
    }

    async fn answer_question(
        &self,
        question: &str,
        _document_context: &str,
        _category: DocumentCategory,
    ) -> String {
        tracing::info!("Mock answer for question: {}", question);

        format!(
            "This is a mock answer from the Mock LLM service. The question was: \"{}\". \
             In a real implementation, this would use OpenAI to analyze the document context \
             and provide an accurate answer.",
            question
        )
    }
}
