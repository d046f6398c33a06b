//! Network-backed LLM service over an OpenAI-compatible client.

use crate::llm_service::LlmService;
use docqa_core::{AppConfig, AppResult, DocumentCategory};
use docqa_llm::{create_client, LlmClient, LlmRequest};
use docqa_prompt::{build_answer_prompt, build_classification_prompt, BuiltPrompt};
use std::sync::Arc;

/// Answer returned when no API key is configured.
pub const NOT_CONFIGURED_ANSWER: &str =
    "The language model API key is not configured. Please configure the API key to get answers.";

/// Answer returned when the provider call fails.
pub const UNEXPECTED_ERROR_ANSWER: &str = "An unexpected error occurred. Please try again later.";

/// Answer returned when the provider produced no text.
pub const EMPTY_ANSWER: &str = "Sorry, I couldn't generate an answer. Please try again.";

const CLASSIFY_MAX_TOKENS: u32 = 50;
const CLASSIFY_TEMPERATURE: f32 = 0.3;
const ANSWER_MAX_TOKENS: u32 = 500;
const ANSWER_TEMPERATURE: f32 = 0.7;

pub struct RemoteLlmService {
    client: Option<Arc<dyn LlmClient>>,
    model: String,
}

impl RemoteLlmService {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client: Some(client),
            model: model.into(),
        }
    }

    /// Service without credentials; every call returns the fallback result.
    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self {
            client: None,
            model: model.into(),
        }
    }

    /// Build the service from configuration. A missing API key is not an
    /// error; it leaves the service unconfigured.
    pub fn from_config(config: &AppConfig) -> Self {
        let Some(api_key) = config.resolve_api_key() else {
            tracing::debug!("No API key configured for the network-backed LLM service");
            return Self::unconfigured(config.model.clone());
        };

        match create_client("openai", Some(&config.endpoint), Some(&api_key)) {
            Ok(client) => Self::new(client, config.model.clone()),
            Err(e) => {
                tracing::warn!("Failed to create LLM client: {}", e);
                Self::unconfigured(config.model.clone())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn request(&self, prompt: BuiltPrompt, max_tokens: u32, temperature: f32) -> LlmRequest {
        let mut request = LlmRequest::new(prompt.user, self.model.clone())
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);

        if let Some(system) = prompt.system {
            request = request.with_system(system);
        }

        request
    }

    async fn classify(
        &self,
        client: &dyn LlmClient,
        file_name: &str,
        content: &str,
    ) -> AppResult<DocumentCategory> {
        let prompt = build_classification_prompt(file_name, content)?;
        let request = self.request(prompt, CLASSIFY_MAX_TOKENS, CLASSIFY_TEMPERATURE);

        let response = client.complete(&request).await?;
        let category = DocumentCategory::from_label(&response.content);

        tracing::info!(
            "Classified '{}' as {} (raw response: {:?})",
            file_name,
            category,
            response.content
        );

        Ok(category)
    }

    async fn answer(
        &self,
        client: &dyn LlmClient,
        question: &str,
        document_context: &str,
        category: DocumentCategory,
    ) -> AppResult<String> {
        let prompt = build_answer_prompt(question, document_context, category)?;
        let request = self.request(prompt, ANSWER_MAX_TOKENS, ANSWER_TEMPERATURE);

        let response = client.complete(&request).await?;
        tracing::debug!("Answer used {} tokens", response.usage.total_tokens);

        Ok(response.content.trim().to_string())
    }
}

#[async_trait::async_trait]
impl LlmService for RemoteLlmService {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn identify_document_type(&self, file_name: &str, content: &str) -> DocumentCategory {
        let Some(client) = &self.client else {
            tracing::warn!("LLM API key not configured, classifying '{}' as UNDEFINED", file_name);
            return DocumentCategory::Undefined;
        };

        match self.classify(client.as_ref(), file_name, content).await {
            Ok(category) => category,
            Err(e) => {
                tracing::error!("Classification of '{}' failed: {}", file_name, e);
                DocumentCategory::Undefined
            }
        }
    }

    async fn answer_question(
        &self,
        question: &str,
        document_context: &str,
        category: DocumentCategory,
    ) -> String {
        let Some(client) = &self.client else {
            tracing::warn!("LLM API key not configured, cannot answer question");
            return NOT_CONFIGURED_ANSWER.to_string();
        };

        match self
            .answer(client.as_ref(), question, document_context, category)
            .await
        {
            Ok(answer) if answer.is_empty() => {
                tracing::warn!("LLM returned an empty answer");
                EMPTY_ANSWER.to_string()
            }
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Answering failed: {}", e);
                UNEXPECTED_ERROR_ANSWER.to_string()
            }
        }
    }
}
