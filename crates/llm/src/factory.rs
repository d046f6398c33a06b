//! LLM client factory.
//!
//! This module creates network clients from configuration values. It handles
//! provider resolution and secret injection; it never performs network I/O.

use crate::client::LlmClient;
use crate::providers::OpenAiClient;
use crate::types::ProviderType;
use docqa_core::config::DEFAULT_ENDPOINT;
use docqa_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key; blank keys count as missing
///
/// # Errors
/// Returns `AppError::Config` if:
/// - The provider has no network client (e.g. "mock")
/// - The provider is unknown
/// - The API key is missing
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match ProviderType::parse(provider) {
        Some(ProviderType::OpenAI) => {
            let api_key = api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| AppError::Config("OpenAI provider requires API key".to_string()))?;

            let base_url = endpoint.unwrap_or(DEFAULT_ENDPOINT);
            Ok(Arc::new(OpenAiClient::with_base_url(base_url, api_key)))
        }
        Some(ProviderType::Mock) => Err(AppError::Config(
            "Mock provider does not use a network client".to_string(),
        )),
        None => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}
