//! News sources.

pub mod client;
pub mod types;

pub use client::NewsApiClient;
pub use types::{Article, ArticleSource};

/// A source of news articles for a topic.
///
/// Implementations swallow transport and decoding failures: they log a
/// warning and return no articles.
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch articles matching `topic`.
    async fn fetch(&self, topic: &str) -> Vec<Article>;
}
