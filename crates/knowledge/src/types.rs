//! Knowledge system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Publisher and headline attached to every stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    /// Publisher name (e.g., "Reuters")
    pub source: String,

    /// Article headline
    pub title: String,
}

/// A document ready to be embedded and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDocument {
    /// Raw article text
    pub content: String,

    pub metadata: ArticleMetadata,
}

/// A record persisted in a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Identifier of the form `doc_<n>`
    pub id: String,

    /// Embedding vector
    #[serde(skip_serializing, default)]
    pub embedding: Vec<f32>,

    /// Document text
    pub document: String,

    pub metadata: ArticleMetadata,

    /// When the record was appended
    pub ingested_at: DateTime<Utc>,
}

/// A record that has been embedded but not yet assigned an id.
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub embedding: Vec<f32>,
    pub document: String,
    pub metadata: ArticleMetadata,
}

/// Statistics from an ingest operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Topic that was searched
    pub topic: String,

    /// Articles returned by the news source
    pub fetched: usize,

    /// Articles dropped for missing content
    pub skipped: usize,

    /// Records appended to the collection
    pub stored: usize,

    /// Ids assigned to the new records
    pub ids: Vec<String>,

    /// Duration in seconds
    pub duration_secs: f64,
}

/// Statistics for a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Collection name
    pub collection: String,

    /// Number of stored records
    pub records: usize,

    /// Embedding dimensions of stored records, if any exist
    pub dimensions: Option<usize>,

    /// Embedding provider and model used to build the collection
    pub embedding_provider: String,
    pub embedding_model: String,

    /// Database file, for persistent collections
    pub db_path: Option<PathBuf>,

    /// Database size in bytes
    pub db_size_bytes: u64,

    /// Most recent append
    pub last_ingested_at: Option<DateTime<Utc>>,
}
