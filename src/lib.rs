//! Research paper analysis gateway backed by an OpenAI-compatible LLM provider
mod client;
mod config;
mod message;
mod prompt;
mod provider;
mod research;
mod types;

#[cfg(test)]
mod mock_server;

#[cfg(feature = "gate")]
pub mod gate;

pub mod fallback;

use thiserror::Error;

/// Result type for research-gate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for research-gate operations
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a missing or empty required field
    #[error("{0}")]
    InvalidInput(String),

    /// Provider or network failure; the message is passed through unchanged
    #[error("{0}")]
    Upstream(String),

    /// Provider content was not valid JSON for the expected schema
    #[error("Failed to parse provider response: {0}")]
    UpstreamParse(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

pub use client::{Client, Completion, OpenRouterClient};
pub use config::ProviderConfig;
pub use fallback::DemoModePolicy;
pub use message::{Message, MessageRole, Usage};
pub use prompt::{truncate_chars, MAX_TEXT_CHARS};
pub use provider::create_client;
pub use research::ResearchService;
pub use types::{
    extract_json, ChatRequest, ChatResult, ChatTurn, InsightRequest, InsightResult,
    ReadinessRequest, ReadinessResult, SearchRequest, SearchResult, SummaryRequest,
    SummaryResult, TextRequest,
};
