//! Route logic: validate, prompt, call the provider, shape the answer

use crate::client::{Client, Completion};
use crate::fallback::{self, DemoModePolicy};
use crate::prompt;
use crate::types::{
    extract_json, ChatRequest, ChatResult, InsightRequest, InsightResult, ReadinessRequest,
    ReadinessResult, SearchRequest, SearchResult, SummaryRequest, SummaryResult,
};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

/// Stateless research operations over an injected provider client
#[derive(Clone)]
pub struct ResearchService {
    client: Arc<dyn Client>,
    policy: DemoModePolicy,
}

impl ResearchService {
    pub fn new(client: Arc<dyn Client>, policy: DemoModePolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> DemoModePolicy {
        self.policy
    }

    /// Structured summary of the paper text
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let text = request.require_text()?;
        info!(chars = text.chars().count(), "Summarize request");

        match self.client.complete(&prompt::summary_prompt(text)).await {
            Completion::Text(content) => parse_structured(&content),
            Completion::Unauthorized => self.policy.absorb("summarize", fallback::summary),
            Completion::Failure(message) => Err(upstream("summarize", message)),
        }
    }

    /// Key concepts, objectives, results and conclusions of the paper
    pub async fn insights(&self, request: &InsightRequest) -> Result<InsightResult> {
        let text = request.require_text()?;
        info!(chars = text.chars().count(), "Insights request");

        match self.client.complete(&prompt::insight_prompt(text)).await {
            Completion::Text(content) => parse_structured(&content),
            Completion::Unauthorized => self.policy.absorb("insights", fallback::insights),
            Completion::Failure(message) => Err(upstream("insights", message)),
        }
    }

    /// Simulated semantic search answered from the model's general knowledge
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        let query = request.require_query()?;
        info!(query = %prompt::truncate_chars(query, 120), "Search request");

        match self.client.complete(&prompt::search_prompt(query)).await {
            Completion::Text(answer) => Ok(SearchResult { answer }),
            Completion::Unauthorized => self.policy.absorb("search", || fallback::search(query)),
            Completion::Failure(message) => Err(upstream("search", message)),
        }
    }

    /// Forward the last chat turn verbatim
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResult> {
        let last = request.require_last()?;
        info!(role = %last.role, chars = last.content.chars().count(), "Chat request");

        match self.client.complete(&last.content).await {
            Completion::Text(response) => Ok(ChatResult { response }),
            Completion::Unauthorized => self.policy.absorb("chat", fallback::chat),
            Completion::Failure(message) => Err(upstream("chat", message)),
        }
    }

    /// Peer-review style publication readiness scores
    pub async fn readiness(&self, request: &ReadinessRequest) -> Result<ReadinessResult> {
        let text = request.require_text()?;
        info!(chars = text.chars().count(), "Research readiness request");

        match self.client.complete(&prompt::readiness_prompt(text)).await {
            Completion::Text(content) => parse_structured(&content),
            Completion::Unauthorized => self.policy.absorb("research-readiness", fallback::readiness),
            Completion::Failure(message) => Err(upstream("research-readiness", message)),
        }
    }
}

fn parse_structured<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(extract_json(content)).map_err(|e| {
        error!("Provider returned content that does not match the schema: {}", e);
        Error::UpstreamParse(e)
    })
}

fn upstream(route: &str, message: String) -> Error {
    error!(route = %route, "Provider call failed: {}", message);
    Error::Upstream(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatTurn, TextRequest};
    use std::sync::Mutex;

    /// Replies with a fixed completion and records every prompt
    struct StubClient {
        reply: Completion,
        prompts: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn new(reply: Completion) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Client for StubClient {
        async fn complete(&self, prompt: &str) -> Completion {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn service(stub: &Arc<StubClient>, policy: DemoModePolicy) -> ResearchService {
        ResearchService::new(stub.clone(), policy)
    }

    #[tokio::test]
    async fn test_summarize_strips_fences() {
        let stub = StubClient::new(Completion::Text(
            "```json\n{\"abstract\":\"a\",\"findings\":[],\"methodology\":\"m\",\"limitations\":\"l\"}\n```".to_string(),
        ));
        let result = service(&stub, DemoModePolicy::Enabled)
            .summarize(&TextRequest::new("paper"))
            .await
            .unwrap();

        assert_eq!(result.r#abstract, "a");
        assert!(result.findings.is_empty());
        assert_eq!(result.methodology, "m");
        assert_eq!(result.limitations, "l");
    }

    #[tokio::test]
    async fn test_validation_never_reaches_provider() {
        let stub = StubClient::new(Completion::Text("unused".to_string()));
        let svc = service(&stub, DemoModePolicy::Enabled);

        assert!(matches!(svc.summarize(&TextRequest::default()).await, Err(Error::InvalidInput(_))));
        assert!(matches!(svc.search(&SearchRequest::new("")).await, Err(Error::InvalidInput(_))));
        assert!(matches!(svc.chat(&ChatRequest::new(vec![])).await, Err(Error::InvalidInput(_))));
        assert!(stub.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_insights_schema_mismatch_is_parse_error() {
        let stub = StubClient::new(Completion::Text("{\"keyConcepts\": []}".to_string()));
        let err = service(&stub, DemoModePolicy::Enabled)
            .insights(&TextRequest::new("paper"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamParse(_)));
    }

    #[tokio::test]
    async fn test_search_returns_plain_text() {
        let stub = StubClient::new(Completion::Text("Transformers are...".to_string()));
        let result = service(&stub, DemoModePolicy::Enabled)
            .search(&SearchRequest::new("what are transformers"))
            .await
            .unwrap();
        assert_eq!(result.answer, "Transformers are...");
        assert!(stub.prompts()[0].contains("\"what are transformers\""));
    }

    #[tokio::test]
    async fn test_chat_forwards_only_last_turn() {
        let stub = StubClient::new(Completion::Text("reply".to_string()));
        let request = ChatRequest::new(vec![ChatTurn::user("A"), ChatTurn::user("B")]);
        let result = service(&stub, DemoModePolicy::Enabled).chat(&request).await.unwrap();

        assert_eq!(result.response, "reply");
        assert_eq!(stub.prompts(), vec!["B".to_string()]);
    }

    #[tokio::test]
    async fn test_unauthorized_uses_fallback_when_enabled() {
        let stub = StubClient::new(Completion::Unauthorized);
        let result = service(&stub, DemoModePolicy::Enabled)
            .search(&SearchRequest::new("gnn"))
            .await
            .unwrap();
        assert_eq!(result, fallback::search("gnn"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_error_when_disabled() {
        let stub = StubClient::new(Completion::Unauthorized);
        let err = service(&stub, DemoModePolicy::Disabled)
            .summarize(&TextRequest::new("paper"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_failure_message_passes_through() {
        let stub = StubClient::new(Completion::Failure("rate limited".to_string()));
        let err = service(&stub, DemoModePolicy::Enabled)
            .readiness(&TextRequest::new("paper"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn test_readiness_fills_missing_fields() {
        let stub = StubClient::new(Completion::Text("{\"novelty_score\": 72}".to_string()));
        let result = service(&stub, DemoModePolicy::Enabled)
            .readiness(&TextRequest::new("paper"))
            .await
            .unwrap();
        assert_eq!(result.novelty_score, 72.0);
        assert_eq!(result.final_verdict, "Evaluation Incomplete");
    }
}
