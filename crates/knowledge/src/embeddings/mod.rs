//! Embedding providers for news collections.
//!
//! A collection is always embedded by one provider/model pair; the pair is
//! recorded by [`EmbeddingConfig::ensure_persisted`].

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
