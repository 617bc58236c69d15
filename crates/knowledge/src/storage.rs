//! News collection: embedding plus vector storage behind one handle.

use crate::embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
use crate::sqlite_store::SqliteStore;
use crate::types::{ArticleMetadata, CollectionStats, PendingRecord, StoredRecord};
use crate::vector_store::VectorStore;
use newsrag_core::{AppConfig, AppError, AppResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Default number of documents returned by [`NewsStore::query`].
pub const DEFAULT_TOP_K: usize = 5;

/// An embedded, queryable collection of news documents.
///
/// Opened once at startup and shared (behind `Arc`) for the process
/// lifetime. Records are only ever appended.
pub struct NewsStore {
    collection: String,
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    db_path: Option<PathBuf>,
}

impl NewsStore {
    /// Assemble a collection from an explicit store and embedder.
    pub fn new(
        collection: impl Into<String>,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            collection: collection.into(),
            store,
            embedder,
            db_path: None,
        }
    }

    /// Open (or create) the persistent collection named in the config.
    ///
    /// Fails if the collection was previously built with different embedding
    /// settings, or if its stored vectors do not match the provider's
    /// dimensionality.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let embedding_config = EmbeddingConfig::from(&config.embedding);
        embedding_config.ensure_persisted(&config.db_dir, &config.collection)?;

        let embedder = create_provider(&embedding_config).await?;

        let db_path = crate::config::get_db_path(&config.db_dir, &config.collection);
        let store = SqliteStore::open(&db_path)?;

        if let Some(stored) = store.dimensions()? {
            if stored != embedder.dimensions() {
                return Err(AppError::Knowledge(format!(
                    "Collection '{}' holds {}-dimensional embeddings but provider '{}' produces {}",
                    config.collection,
                    stored,
                    embedder.provider_name(),
                    embedder.dimensions()
                )));
            }
        }

        tracing::info!(
            "Opened collection '{}' at {:?} ({} records, embeddings: {}/{})",
            config.collection,
            db_path,
            store.count()?,
            embedder.provider_name(),
            embedder.model_name()
        );

        Ok(Self {
            collection: config.collection.clone(),
            store: Arc::new(store),
            embedder,
            db_path: Some(db_path),
        })
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Embed and append documents with their metadata.
    ///
    /// `documents` and `metadatas` are parallel sequences. All documents are
    /// embedded in one batch and appended in one store call. Returns the
    /// assigned ids in input order. Identical documents are stored again.
    pub async fn add_documents(
        &self,
        documents: Vec<String>,
        metadatas: Vec<ArticleMetadata>,
    ) -> AppResult<Vec<String>> {
        if documents.len() != metadatas.len() {
            return Err(AppError::Knowledge(format!(
                "documents and metadatas must have the same length ({} vs {})",
                documents.len(),
                metadatas.len()
            )));
        }

        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.embedder.embed_batch(&documents).await?;
        if embeddings.len() != documents.len() {
            return Err(AppError::Knowledge(format!(
                "Embedding provider returned {} vectors for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        let records: Vec<PendingRecord> = embeddings
            .into_iter()
            .zip(documents)
            .zip(metadatas)
            .map(|((embedding, document), metadata)| PendingRecord {
                embedding,
                document,
                metadata,
            })
            .collect();

        let ids = self.store.append(records)?;

        tracing::info!(
            "Added {} documents to collection '{}'",
            ids.len(),
            self.collection
        );

        Ok(ids)
    }

    /// Return the `top_k` document texts most similar to `question`, most
    /// similar first. An empty collection yields an empty list.
    pub async fn query(&self, question: &str, top_k: usize) -> AppResult<Vec<String>> {
        Ok(self
            .query_scored(question, top_k)
            .await?
            .into_iter()
            .map(|(record, _)| record.document)
            .collect())
    }

    /// Like [`query`](Self::query) but keeps the full records and scores.
    pub async fn query_scored(
        &self,
        question: &str,
        top_k: usize,
    ) -> AppResult<Vec<(StoredRecord, f32)>> {
        if self.store.count()? == 0 {
            tracing::debug!("Collection '{}' is empty", self.collection);
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.store.search(&query_embedding, top_k)?;

        if let Some((top, score)) = results.first() {
            tracing::debug!(
                "Top match for query: {} (score: {:.3}, {} results)",
                top.id,
                score,
                results.len()
            );
        }

        Ok(results)
    }

    /// Summarize the collection.
    pub fn stats(&self) -> AppResult<CollectionStats> {
        let db_size_bytes = self
            .db_path
            .as_ref()
            .and_then(|path| std::fs::metadata(path).ok())
            .map(|meta| meta.len())
            .unwrap_or(0);

        Ok(CollectionStats {
            collection: self.collection.clone(),
            records: self.store.count()?,
            dimensions: self.store.dimensions()?,
            embedding_provider: self.embedder.provider_name().to_string(),
            embedding_model: self.embedder.model_name().to_string(),
            db_path: self.db_path.clone(),
            db_size_bytes,
            last_ingested_at: self.store.last_ingested_at()?,
        })
    }
}
