//! News knowledge base: ingestion, vector storage and RAG answering.
//!
//! Articles are fetched from a [`news::NewsSource`], embedded by an
//! [`embeddings::EmbeddingProvider`], appended to a [`vector_store::VectorStore`]
//! through [`NewsStore`], and answered over by [`rag::Answerer`].

pub mod config;
pub mod embeddings;
pub mod ingest;
pub mod memory_store;
pub mod news;
pub mod rag;
pub mod sqlite_store;
pub mod storage;
pub mod types;
pub mod vector_store;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ingest::{ingest_topic, DEFAULT_TOPIC};
pub use news::{NewsApiClient, NewsSource};
pub use rag::{Answerer, RagResponse};
pub use storage::{NewsStore, DEFAULT_TOP_K};
pub use types::{ArticleMetadata, CollectionStats, IngestStats, NewsDocument, StoredRecord};
