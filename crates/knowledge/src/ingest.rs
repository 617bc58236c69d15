//! Topic ingestion: news source to collection.

use crate::news::NewsSource;
use crate::storage::NewsStore;
use crate::types::IngestStats;
use newsrag_core::AppResult;
use std::time::Instant;

/// Topic used when none is given.
pub const DEFAULT_TOPIC: &str = "NVIDIA";

/// Fetch articles for `topic` and store those with content.
///
/// Articles whose content is missing or blank are skipped. When nothing
/// survives, the store is not touched.
pub async fn ingest_topic(
    source: &dyn NewsSource,
    store: &NewsStore,
    topic: &str,
) -> AppResult<IngestStats> {
    let start = Instant::now();

    tracing::info!(
        "Starting ingestion for topic '{}' into '{}'",
        topic,
        store.collection()
    );

    let articles = source.fetch(topic).await;
    let fetched = articles.len();

    let (documents, metadatas): (Vec<String>, Vec<_>) = articles
        .into_iter()
        .filter_map(|article| article.into_document())
        .map(|doc| (doc.content, doc.metadata))
        .unzip();

    let skipped = fetched - documents.len();
    if skipped > 0 {
        tracing::debug!("Skipped {} articles without content", skipped);
    }

    let ids = if documents.is_empty() {
        tracing::info!("No articles with content for '{}'; nothing to store", topic);
        Vec::new()
    } else {
        store.add_documents(documents, metadatas).await?
    };

    let duration = start.elapsed();

    tracing::info!(
        "Ingestion completed: {} fetched, {} stored, {} skipped in {:.2}s",
        fetched,
        ids.len(),
        skipped,
        duration.as_secs_f64()
    );

    Ok(IngestStats {
        topic: topic.to_string(),
        fetched,
        skipped,
        stored: ids.len(),
        ids,
        duration_secs: duration.as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;
    use crate::memory_store::MemoryStore;
    use crate::news::{Article, ArticleSource};
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Returns canned articles and records the topics it was asked for.
    struct ScriptedSource {
        articles: Vec<Article>,
        topics: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(articles: Vec<Article>) -> Self {
            Self {
                articles,
                topics: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl NewsSource for ScriptedSource {
        async fn fetch(&self, topic: &str) -> Vec<Article> {
            self.topics.lock().unwrap().push(topic.to_string());
            self.articles.clone()
        }
    }

    fn article(title: &str, content: Option<&str>) -> Article {
        Article {
            source: Some(ArticleSource {
                id: None,
                name: Some("Reuters".to_string()),
            }),
            title: Some(title.to_string()),
            content: content.map(str::to_string),
            ..Default::default()
        }
    }

    fn news_store() -> NewsStore {
        NewsStore::new(
            "test",
            Arc::new(MemoryStore::new()),
            Arc::new(TrigramProvider::new(384)),
        )
    }

    #[tokio::test]
    async fn test_ingest_skips_articles_without_content() {
        let source = ScriptedSource::new(vec![
            article("Beat", Some("Company X beats earnings")),
            article("Empty", Some("")),
            article("Blank", Some("  \t")),
            article("Null", None),
            article("Miss", Some("Company Y misses earnings")),
        ]);
        let store = news_store();

        let stats = ingest_topic(&source, &store, "earnings").await.unwrap();

        assert_eq!(stats.topic, "earnings");
        assert_eq!(stats.fetched, 5);
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.stored, 2);
        assert_eq!(stats.ids, vec!["doc_0", "doc_1"]);
        assert_eq!(*source.topics.lock().unwrap(), vec!["earnings"]);

        let docs = store.query("earnings", 10).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| !d.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_ingest_nothing_usable() {
        let source = ScriptedSource::new(vec![article("Null", None)]);
        let store = news_store();

        let stats = ingest_topic(&source, &store, DEFAULT_TOPIC).await.unwrap();

        assert_eq!(stats.stored, 0);
        assert!(stats.ids.is_empty());
        assert_eq!(store.stats().unwrap().records, 0);
    }

    #[tokio::test]
    async fn test_ingest_empty_source() {
        let source = ScriptedSource::new(Vec::new());
        let store = news_store();

        let stats = ingest_topic(&source, &store, DEFAULT_TOPIC).await.unwrap();
        assert_eq!(store.collection(), "test");
        assert_eq!(stats.fetched, 0);
        assert_eq!(stats.stored, 0);
    }

    #[tokio::test]
    async fn test_repeat_ingest_appends() {
        let source = ScriptedSource::new(vec![article("Beat", Some("Company X beats earnings"))]);
        let store = news_store();

        ingest_topic(&source, &store, "earnings").await.unwrap();
        let second = ingest_topic(&source, &store, "earnings").await.unwrap();

        assert_eq!(second.ids, vec!["doc_1"]);
        assert_eq!(store.stats().unwrap().records, 2);
    }
}
