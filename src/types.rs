//! Request and response bodies for the research routes

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const NO_TEXT: &str = "No text provided";
const NO_QUERY: &str = "No query provided";
const NO_MESSAGES: &str = "No messages provided";

/// Body carrying a block of paper text
///
/// `text` is optional at the serde level so that an absent key, `null` and
/// `""` all produce the same validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub(crate) fn require_text(&self) -> Result<&str> {
        require(self.text.as_deref(), NO_TEXT)
    }
}

/// Body of `POST /summarize/`
pub type SummaryRequest = TextRequest;

/// Body of `POST /insights/`
pub type InsightRequest = TextRequest;

/// Body of `POST /research-readiness/`
pub type ReadinessRequest = TextRequest;

/// Body of `POST /search/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
        }
    }

    pub(crate) fn require_query(&self) -> Result<&str> {
        require(self.query.as_deref(), NO_QUERY)
    }
}

/// One turn of a chat transcript as sent by the front-end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /chat/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatTurn>) -> Self {
        Self {
            messages: Some(messages),
        }
    }

    /// The most recent turn; earlier turns are not forwarded
    pub(crate) fn require_last(&self) -> Result<&ChatTurn> {
        self.messages
            .as_deref()
            .and_then(|turns| turns.last())
            .ok_or_else(|| Error::InvalidInput(NO_MESSAGES.to_string()))
    }
}

fn require<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::InvalidInput(message.to_string())),
    }
}

/// Structured summary of a paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "abstract")]
    pub r#abstract: String,
    pub findings: Vec<String>,
    pub methodology: String,
    pub limitations: String,
}

/// Technical insights extracted from a paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub key_concepts: Vec<String>,
    pub objectives: Vec<String>,
    pub results: Vec<String>,
    pub conclusions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
}

/// Publication readiness review
///
/// Every field is optional in the provider's answer; missing or `null`
/// ones take the same defaults the front-end would otherwise fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReadiness")]
pub struct ReadinessResult {
    pub novelty_score: f64,
    pub technical_depth_score: f64,
    pub experimental_rigor_score: f64,
    pub literature_coverage_score: f64,
    pub publication_readiness_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub suitable_venues: Vec<String>,
    pub final_verdict: String,
}

/// Provider-side shape of [`ReadinessResult`]; absent and `null` both decode to `None`
#[derive(Deserialize)]
struct RawReadiness {
    #[serde(default)]
    novelty_score: Option<f64>,
    #[serde(default)]
    technical_depth_score: Option<f64>,
    #[serde(default)]
    experimental_rigor_score: Option<f64>,
    #[serde(default)]
    literature_coverage_score: Option<f64>,
    #[serde(default)]
    publication_readiness_score: Option<f64>,
    #[serde(default)]
    strengths: Option<Vec<String>>,
    #[serde(default)]
    weaknesses: Option<Vec<String>>,
    #[serde(default)]
    suggestions: Option<Vec<String>>,
    #[serde(default)]
    suitable_venues: Option<Vec<String>>,
    #[serde(default)]
    final_verdict: Option<String>,
}

impl From<RawReadiness> for ReadinessResult {
    fn from(raw: RawReadiness) -> Self {
        Self {
            novelty_score: raw.novelty_score.unwrap_or_default(),
            technical_depth_score: raw.technical_depth_score.unwrap_or_default(),
            experimental_rigor_score: raw.experimental_rigor_score.unwrap_or_default(),
            literature_coverage_score: raw.literature_coverage_score.unwrap_or_default(),
            publication_readiness_score: raw.publication_readiness_score.unwrap_or_default(),
            strengths: raw.strengths.unwrap_or_default(),
            weaknesses: raw.weaknesses.unwrap_or_default(),
            suggestions: raw.suggestions.unwrap_or_default(),
            suitable_venues: raw
                .suitable_venues
                .unwrap_or_else(|| vec!["Not specified".to_string()]),
            final_verdict: raw
                .final_verdict
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "Evaluation Incomplete".to_string()),
        }
    }
}

/// Strip markdown code fences from model output and return the JSON inside.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` fences, with or without a
/// preamble before the opening fence. Content that already starts as a JSON
/// object or array is returned trimmed and untouched, so backticks inside
/// string values survive.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };

    // Language tag, if any, sits directly after the opening fence
    let body = trimmed[start + 3..]
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    // The closing fence is the last one; earlier ones belong to string values
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}
