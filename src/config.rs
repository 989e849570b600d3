//! Provider configuration
//!
//! The provider configuration is read once at startup and injected into the
//! client. Request handling never touches the environment.
//!
//! Environment variables:
//! - `OPENROUTER_API_KEY` - API key (absent or empty enables demo mode)
//! - `OPENROUTER_API_BASE` - API base URL
//! - `OPENROUTER_MODEL` - Model identifier sent with every completion
//!
//! The request timeout belongs to the gateway configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
const API_BASE_VAR: &str = "OPENROUTER_API_BASE";
const MODEL_VAR: &str = "OPENROUTER_MODEL";

/// Configuration for the LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "google/gemini-flash-1.5".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl ProviderConfig {
    /// Create a configuration for an explicit endpoint and key
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: normalize_key(api_key),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = normalize_key(lookup(API_KEY_VAR));
        if config.api_key.is_none() {
            tracing::warn!(
                "{} is not set; every request will be served in demo mode",
                API_KEY_VAR
            );
        }

        if let Some(base) = lookup(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(crate::Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    API_BASE_VAR, base
                )));
            }
            config.api_base = base;
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }

        Ok(config)
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Whether an API key is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ProviderConfig::from_lookup(|_| None).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.api_base, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "google/gemini-flash-1.5");
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ProviderConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("OPENROUTER_API_BASE", "http://localhost:9000/v1/"),
            ("OPENROUTER_MODEL", "openai/gpt-4o-mini"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = ProviderConfig::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "   ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_non_http_base_is_config_error() {
        let result = ProviderConfig::from_lookup(lookup_from(&[("OPENROUTER_API_BASE", "openrouter.ai")]));
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = ProviderConfig::new("http://localhost", Some("secret".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
