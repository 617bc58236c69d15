//! Retrieval ranking and collection persistence.

use super::{memory_news_store, test_config};
use crate::storage::NewsStore;
use crate::types::ArticleMetadata;
use std::sync::Arc;
use tempfile::TempDir;

fn meta(title: &str) -> ArticleMetadata {
    ArticleMetadata {
        source: "Wire".to_string(),
        title: title.to_string(),
    }
}

async fn add_earnings_pair(store: &NewsStore) {
    store
        .add_documents(
            vec![
                "Company X beats earnings".to_string(),
                "Company Y misses earnings".to_string(),
            ],
            vec![meta("X"), meta("Y")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_beat_question_ranks_beat_story_first() {
    let store = memory_news_store();
    add_earnings_pair(&store).await;

    let docs = store.query("Who beat earnings?", 5).await.unwrap();
    assert_eq!(
        docs,
        vec![
            "Company X beats earnings".to_string(),
            "Company Y misses earnings".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_scores_are_descending() {
    let store = memory_news_store();
    store
        .add_documents(
            vec![
                "Oil prices fall as inventories climb".to_string(),
                "Chipmaker earnings beat expectations".to_string(),
                "Retail sales slow in March".to_string(),
            ],
            vec![meta("oil"), meta("chips"), meta("retail")],
        )
        .await
        .unwrap();

    let scored = store.query_scored("chipmaker earnings", 3).await.unwrap();
    assert_eq!(scored.len(), 3);
    assert_eq!(scored[0].0.metadata.title, "chips");
    assert!(scored.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[tokio::test]
async fn test_top_k_limits_results() {
    let store = memory_news_store();
    add_earnings_pair(&store).await;

    assert_eq!(store.query("earnings", 1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_persistent_collection_ranks_and_reopens() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), &[]);

    {
        let store = NewsStore::open(&config).await.unwrap();
        add_earnings_pair(&store).await;
    }

    assert!(config.db_dir.join("financial_news.sqlite").exists());
    assert!(config.db_dir.join("financial_news.embedding.yaml").exists());

    let store = NewsStore::open(&config).await.unwrap();
    let stats = store.stats().unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.dimensions, Some(384));
    assert!(stats.db_size_bytes > 0);

    let docs = store.query("Who beat earnings?", 5).await.unwrap();
    assert_eq!(docs[0], "Company X beats earnings");
}

#[tokio::test]
async fn test_reopen_with_different_dimensions_fails() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path(), &[]);

    {
        let store = NewsStore::open(&config).await.unwrap();
        add_earnings_pair(&store).await;
    }

    config.embedding.dimensions = 128;
    let err = match NewsStore::open(&config).await {
        Ok(_) => panic!("Expected dimension mismatch on reopen"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("Dimension mismatch"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_documents_unique_ids() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), &[]);
    let store = Arc::new(NewsStore::open(&config).await.unwrap());

    let tasks: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .add_documents(
                        vec![format!("Story {} one", t), format!("Story {} two", t)],
                        vec![meta("one"), meta("two")],
                    )
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.extend(task.await.unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 16);
    assert_eq!(store.stats().unwrap().records, 16);
}
