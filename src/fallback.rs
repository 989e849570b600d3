//! Demo mode: canned answers served when the provider rejects the API key

use crate::types::{ChatResult, InsightResult, ReadinessResult, SearchResult, SummaryResult};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Message surfaced when demo mode is off and the provider answers 401
const UNAUTHORIZED_MESSAGE: &str = "Provider rejected the API key (401 Unauthorized)";

/// What to do when the provider reports the credentials as unauthorized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoModePolicy {
    /// Answer with the route's fixed demo payload and HTTP 200
    #[default]
    Enabled,
    /// Surface the rejection as an upstream error
    Disabled,
}

impl DemoModePolicy {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            DemoModePolicy::Enabled
        } else {
            DemoModePolicy::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == DemoModePolicy::Enabled
    }

    /// Resolve an unauthorized completion for `route`
    pub(crate) fn absorb<T>(self, route: &str, fallback: impl FnOnce() -> T) -> Result<T> {
        match self {
            DemoModePolicy::Enabled => {
                tracing::warn!(route = %route, "Provider rejected the API key, serving demo payload");
                Ok(fallback())
            }
            DemoModePolicy::Disabled => {
                tracing::error!(route = %route, "Provider rejected the API key");
                Err(Error::Upstream(UNAUTHORIZED_MESSAGE.to_string()))
            }
        }
    }
}

/// Demo summary
pub fn summary() -> SummaryResult {
    SummaryResult {
        r#abstract: "⚠️ DEMO MODE: This summary could not be generated because the AI API key is invalid. \
                     Please check your .env file."
            .to_string(),
        findings: vec![
            "Demo finding: the analysis service is running without a valid API key.".to_string(),
            "Demo finding: set OPENROUTER_API_KEY to receive a real summary of this paper.".to_string(),
        ],
        methodology: "Not available in demo mode.".to_string(),
        limitations: "This is placeholder content shown because the API key is invalid.".to_string(),
    }
}

pub fn insights() -> InsightResult {
    InsightResult {
        key_concepts: vec![
            "Demo mode".to_string(),
            "Invalid API key".to_string(),
        ],
        objectives: vec!["Configure a valid OPENROUTER_API_KEY to extract real objectives.".to_string()],
        results: vec!["No results were extracted because the AI could not be reached.".to_string()],
        conclusions: vec!["⚠️ DEMO MODE: Please check your .env file.".to_string()],
    }
}

/// Demo search answer naming the query
pub fn search(query: &str) -> SearchResult {
    SearchResult {
        answer: format!(
            "⚠️ DEMO SEARCH: We couldn't reach the AI to answer '{}' because the API key is invalid. \
             Please check your .env file.",
            query
        ),
    }
}

pub fn chat() -> ChatResult {
    ChatResult {
        response: "⚠️ DEMO MODE: The AI assistant is unavailable because the API key is invalid. \
                   Please check your .env file."
            .to_string(),
    }
}

pub fn readiness() -> ReadinessResult {
    ReadinessResult {
        novelty_score: 0.0,
        technical_depth_score: 0.0,
        experimental_rigor_score: 0.0,
        literature_coverage_score: 0.0,
        publication_readiness_score: 0.0,
        strengths: vec![],
        weaknesses: vec!["The paper could not be evaluated because the API key is invalid.".to_string()],
        suggestions: vec!["Set OPENROUTER_API_KEY in your .env file and try again.".to_string()],
        suitable_venues: vec!["Not specified".to_string()],
        final_verdict: "⚠️ DEMO MODE: Evaluation unavailable".to_string(),
    }
}
