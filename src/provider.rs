//! Provider client creation

use super::{client::Client, client::OpenRouterClient, config::ProviderConfig, Result};
use std::sync::Arc;

/// Create the LLM client for the provider configuration.
///
/// Returns a shared trait object so handlers are decoupled from the concrete
/// provider and tests can substitute a stub.
pub fn create_client(config: ProviderConfig) -> Result<Arc<dyn Client>> {
    tracing::info!(
        api_base = %config.api_base,
        model = %config.model,
        demo = !config.has_api_key(),
        "Creating provider client"
    );
    Ok(Arc::new(OpenRouterClient::new(config)?))
}
