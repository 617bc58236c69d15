//! Vector store abstraction for news collections.
//!
//! Defines a trait for backend-agnostic vector storage and retrieval, plus
//! the similarity helpers shared by the implementations.

use crate::types::{PendingRecord, StoredRecord};
use chrono::{DateTime, Utc};
use newsrag_core::{AppError, AppResult};

/// Trait for vector store backends.
///
/// Implementations must support:
/// - Appending embedded records with ids assigned atomically
/// - Searching for similar vectors (top-k)
/// - Reporting collection size and dimensionality
pub trait VectorStore: Send + Sync {
    /// Append records, assigning each an id `doc_<n>` where `n` is the
    /// collection size at assignment plus the record's index in the batch.
    ///
    /// Id assignment and insertion happen in one critical section, so
    /// concurrent appends never reuse an id. All records must share the
    /// collection's embedding dimensionality.
    fn append(&self, records: Vec<PendingRecord>) -> AppResult<Vec<String>>;

    /// Search for the top-k most similar records to the query embedding.
    ///
    /// Returns records ordered by descending cosine similarity; ties keep
    /// insertion order.
    fn search(&self, query_embedding: &[f32], top_k: usize)
        -> AppResult<Vec<(StoredRecord, f32)>>;

    /// Number of stored records.
    fn count(&self) -> AppResult<usize>;

    /// Dimensionality of stored embeddings, or `None` while empty.
    fn dimensions(&self) -> AppResult<Option<usize>>;

    /// Timestamp of the most recently appended record.
    fn last_ingested_at(&self) -> AppResult<Option<DateTime<Utc>>>;
}

/// Format a record id from its position in the collection.
pub fn format_record_id(position: usize) -> String {
    format!("doc_{}", position)
}

/// Check that a batch matches the collection's dimensionality.
///
/// Returns the dimensionality the batch establishes (or confirms).
pub(crate) fn check_dimensions(
    existing: Option<usize>,
    records: &[PendingRecord],
) -> AppResult<Option<usize>> {
    let expected = existing.or_else(|| records.first().map(|r| r.embedding.len()));

    if let Some(expected) = expected {
        if expected == 0 {
            return Err(AppError::Knowledge(
                "Cannot store an empty embedding".to_string(),
            ));
        }

        if let Some(bad) = records.iter().find(|r| r.embedding.len() != expected) {
            return Err(AppError::Knowledge(format!(
                "Embedding dimension mismatch: collection uses {}, got {}",
                expected,
                bad.embedding.len()
            )));
        }
    }

    Ok(expected)
}

/// Rank records against a query embedding and keep the top-k.
pub(crate) fn rank_records(
    records: Vec<StoredRecord>,
    query_embedding: &[f32],
    top_k: usize,
) -> Vec<(StoredRecord, f32)> {
    let mut results: Vec<(StoredRecord, f32)> = records
        .into_iter()
        .map(|record| {
            let score = cosine_similarity(query_embedding, &record.embedding);
            (record, score)
        })
        .collect();

    // Stable sort keeps insertion order among equal scores
    results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(top_k);
    results
}

/// Calculate cosine similarity between two vectors.
///
/// Mismatched lengths and zero vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
