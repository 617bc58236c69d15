//! Generation (LLM) integration for newsrag.
//!
//! A provider-agnostic `LlmClient` trait with two implementations:
//! - **Groq**: hosted OpenAI-compatible chat completions (default)
//! - **Ollama**: local runtime, useful for offline development
//!
//! # Example
//! ```no_run
//! use newsrag_llm::{LlmClient, LlmRequest, providers::GroqClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GroqClient::new("gsk_...")?;
//! let request = LlmRequest::new("Summarise today's market news.", "llama-3.1-8b-instant");
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
pub use providers::{GroqClient, OllamaClient};
pub use types::ProviderType;
