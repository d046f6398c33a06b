//! LLM service trait and provider selection.

use super::providers::{MockLlmService, RemoteLlmService};
use docqa_core::{AppConfig, DocumentCategory};
use docqa_llm::ProviderType;
use std::sync::Arc;

/// Classification and answering capabilities of a provider.
///
/// Neither operation fails: provider problems are absorbed into
/// `DocumentCategory::Undefined` or a fixed user-facing message.
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Get provider name (e.g., "mock", "openai")
    fn provider_name(&self) -> &str;

    /// Determine the category of a document from its name and text.
    async fn identify_document_type(&self, file_name: &str, content: &str) -> DocumentCategory;

    /// Answer a question about a document.
    ///
    /// `document_context` holds the title and full text of the document.
    async fn answer_question(
        &self,
        question: &str,
        document_context: &str,
        category: DocumentCategory,
    ) -> String;
}

/// Resolves the active [`LlmService`] from the configured provider name.
pub struct LlmServiceFactory {
    provider: String,
    mock: Arc<dyn LlmService>,
    remote: Arc<dyn LlmService>,
}

impl LlmServiceFactory {
    pub fn new(
        provider: impl Into<String>,
        mock: Arc<dyn LlmService>,
        remote: Arc<dyn LlmService>,
    ) -> Self {
        Self {
            provider: provider.into(),
            mock,
            remote,
        }
    }

    /// Build both services from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.provider.clone(),
            Arc::new(MockLlmService::new()),
            Arc::new(RemoteLlmService::from_config(config)),
        )
    }

    /// Get the service for the configured provider. Unknown or empty
    /// provider names select the offline service.
    pub fn get_service(&self) -> Arc<dyn LlmService> {
        match ProviderType::resolve(Some(self.provider.as_str())) {
            ProviderType::OpenAI => {
                tracing::debug!("Using network-backed LLM service");
                Arc::clone(&self.remote)
            }
            ProviderType::Mock => {
                tracing::debug!("Using mock LLM service");
                Arc::clone(&self.mock)
            }
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory(provider: &str) -> LlmServiceFactory {
        LlmServiceFactory::new(
            provider,
            Arc::new(MockLlmService::new()),
            Arc::new(RemoteLlmService::unconfigured("gpt-5.1")),
        )
    }

    #[test]
    fn test_selects_by_provider_name() {
        assert_eq!(factory("mock").get_service().provider_name(), "mock");
        assert_eq!(factory("openai").get_service().provider_name(), "openai");
        assert_eq!(factory("OpenAI").get_service().provider_name(), "openai");
    }

    #[test]
    fn test_defaults_to_mock() {
        assert_eq!(factory("").get_service().provider_name(), "mock");
        assert_eq!(factory("anthropic").get_service().provider_name(), "mock");
    }

    #[test]
    fn test_from_default_config() {
        let config = AppConfig::default();
        let factory = LlmServiceFactory::from_config(&config);
        assert_eq!(factory.provider(), "mock");
        assert_eq!(factory.get_service().provider_name(), "mock");
    }
}
