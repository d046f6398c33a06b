//! OpenAI-compatible chat-completions provider.
//!
//! Works against `https://api.openai.com/v1` or any server exposing the same
//! `/chat/completions` contract.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use docqa_core::config::DEFAULT_ENDPOINT;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat-completions response body. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    /// Base URL, without the `/chat/completions` suffix
    base_url: String,

    /// Bearer credential
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client for the public OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a client for a custom OpenAI-compatible endpoint.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Convert LlmRequest to the chat-completions format.
    fn to_chat_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.prompt.clone(),
        });

        ChatRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Take the first choice's message content.
    ///
    /// An empty choice list or a choice without content yields empty text;
    /// the caller decides what an empty completion means.
    fn convert_response(&self, request: &LlmRequest, response: ChatResponse) -> LlmResponse {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        if content.is_none() {
            tracing::warn!("Chat completion returned no message content in the first choice");
        }

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        LlmResponse {
            content: content.unwrap_or_default(),
            model: response.model.unwrap_or_else(|| request.model.clone()),
            usage,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::debug!(
            model = %request.model,
            max_tokens = ?request.max_tokens,
            temperature = ?request.temperature,
            prompt_chars = request.prompt.len(),
            "Sending chat completion request"
        );

        let body = self.to_chat_request(request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to OpenAI: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse OpenAI response: {}", e)))?;

        let converted = self.convert_response(request, chat_response);

        tracing::debug!(
            model = %converted.model,
            total_tokens = converted.usage.total_tokens,
            "Received chat completion"
        );

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP exchange and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{}/v1", addr), handle)
    }

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::with_base_url("http://localhost:8080/v1/", "sk-test");
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(client.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_chat_request_conversion() {
        let client = OpenAiClient::new("sk-test");
        let request = LlmRequest::new("Hello", "gpt-5.1")
            .with_temperature(0.7)
            .with_max_tokens(500);

        let chat = client.to_chat_request(&request);
        assert_eq!(chat.model, "gpt-5.1");
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, "user");
        assert_eq!(chat.messages[0].content, "Hello");
        assert_eq!(chat.max_completion_tokens, Some(500));
        assert_eq!(chat.temperature, Some(0.7));
    }

    #[test]
    fn test_convert_response_empty_choices() {
        let client = OpenAiClient::new("sk-test");
        let request = LlmRequest::new("Hello", "gpt-5.1");
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let response = client.convert_response(&request, parsed);
        assert_eq!(response.content, "");
        assert_eq!(response.model, "gpt-5.1");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"model":"gpt-5.1","choices":[{"message":{"role":"assistant","content":"REPORT"}}],"usage":{"prompt_tokens":12,"completion_tokens":1}}"#,
        )
        .await;

        let client = OpenAiClient::with_base_url(base_url, "sk-test");
        let request = LlmRequest::new("Classify", "gpt-5.1")
            .with_max_tokens(50)
            .with_temperature(0.3);

        let response = client.complete(&request).await.unwrap();
        assert_eq!(response.content, "REPORT");
        assert_eq!(response.usage.total_tokens, 13);

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST /v1/chat/completions"));
        assert!(raw_request
            .to_ascii_lowercase()
            .contains("authorization: bearer sk-test"));
        assert!(raw_request.contains("\"max_completion_tokens\":50"));
        assert!(raw_request.contains("\"temperature\":0.3"));
    }

    #[tokio::test]
    async fn test_complete_http_error() {
        let (base_url, _server) = serve_once(
            "HTTP/1.1 401 Unauthorized",
            r#"{"error":{"message":"bad key"}}"#,
        )
        .await;

        let client = OpenAiClient::with_base_url(base_url, "sk-wrong");
        let err = client
            .complete(&LlmRequest::new("Hi", "gpt-5.1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_complete_malformed_payload() {
        let (base_url, _server) = serve_once("HTTP/1.1 200 OK", "not json").await;

        let client = OpenAiClient::with_base_url(base_url, "sk-test");
        let err = client
            .complete(&LlmRequest::new("Hi", "gpt-5.1"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }
}
