//! LLM provider factory.
//!
//! Builds the configured generation client, injecting the endpoint and
//! API key resolved by the application configuration.

use crate::client::LlmClient;
use crate::providers::{GroqClient, OllamaClient};
use crate::types::ProviderType;
use newsrag_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("groq", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key for providers that require one
///
/// # Errors
/// Returns `AppError::Llm` if the provider is unknown, a required key is
/// missing, or the HTTP client cannot be built.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Llm(format!("Unknown provider: {}", provider)))?;

    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    let api_key = api_key.filter(|key| !key.trim().is_empty());
    if provider_type.requires_api_key() && api_key.is_none() {
        return Err(AppError::Llm(format!(
            "Provider '{}' requires API key",
            provider_type.as_str()
        )));
    }

    tracing::debug!("Creating {} client for {}", provider_type.as_str(), base_url);

    match provider_type {
        ProviderType::Groq => {
            let client = GroqClient::with_base_url(base_url, api_key.unwrap_or_default())?;
            Ok(Arc::new(client))
        }
        ProviderType::Ollama => {
            let client = OllamaClient::with_base_url(base_url)?;
            Ok(Arc::new(client))
        }
    }
}
