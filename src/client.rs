//! LLM client implementation

use super::{config::ProviderConfig, message::Message, Result, Usage};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Build an HTTP client with specified timeout
fn build_http_client(timeout: Duration) -> std::result::Result<HttpClient, reqwest::Error> {
    HttpClient::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Outcome of a single completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Assistant message content
    Text(String),

    /// Provider rejected the credentials, or no key is configured
    Unauthorized,

    /// Any other failure; carries the raw provider body or the transport error
    Failure(String),
}

/// Trait for LLM clients
#[async_trait::async_trait]
pub trait Client: Send + Sync {
    /// Send `prompt` as a single user message and return the outcome
    async fn complete(&self, prompt: &str) -> Completion;
}

/// OpenAI-compatible chat completions client (OpenRouter by default)
pub struct OpenRouterClient {
    config: ProviderConfig,
    http_client: HttpClient,
}

impl OpenRouterClient {
    /// Create a new client
    ///
    /// Construction succeeds without an API key; calls then resolve to
    /// [`Completion::Unauthorized`] without touching the network.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let timeout = config.timeout();
        Ok(OpenRouterClient {
            http_client: build_http_client(timeout)?,
            config,
        })
    }
}

#[async_trait::async_trait]
impl Client for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Completion {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::debug!("No API key configured, skipping provider call");
            return Completion::Unauthorized;
        };

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![Message::user(prompt)],
            stream: false,
        };

        let response = match self
            .http_client
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Completion::Failure(e.to_string()),
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Completion::Unauthorized;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return Completion::Failure(e.to_string()),
        };

        if !status.is_success() {
            tracing::error!("Provider API error ({})", status);
            return Completion::Failure(body);
        }

        parse_completion(&body)
    }
}

/// Extract the first choice's content from a chat completions body
fn parse_completion(body: &str) -> Completion {
    let response: ChatResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            return Completion::Failure(format!(
                "Failed to parse provider response: {}. Body: {}",
                e, body
            ))
        }
    };

    if let Some(usage) = &response.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Provider usage"
        );
    }

    match response.choices.into_iter().next() {
        Some(choice) => Completion::Text(choice.message.content.unwrap_or_default()),
        None => Completion::Failure("No choices in provider response".to_string()),
    }
}

// API request/response types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
