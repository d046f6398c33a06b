//! LLM integration crate for DocQA.
//!
//! This crate provides a provider-agnostic abstraction over chat-completion
//! backends. Callers build an [`LlmRequest`], obtain a client from
//! [`create_client`] and await a single [`LlmResponse`].
//!
//! # Providers
//! - **OpenAI**: any OpenAI-compatible `/chat/completions` endpoint
//!
//! # Example
//! ```no_run
//! use docqa_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...");
//! let request = LlmRequest::new("Hello, world!", "gpt-5.1").with_max_tokens(50);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::OpenAiClient;
pub use types::ProviderType;
