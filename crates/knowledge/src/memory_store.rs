//! In-memory vector store.

use crate::types::{PendingRecord, StoredRecord};
use crate::vector_store::{check_dimensions, format_record_id, rank_records, VectorStore};
use chrono::{DateTime, Utc};
use newsrag_core::{AppError, AppResult};
use std::sync::{Mutex, MutexGuard};

/// A collection held in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<StoredRecord>>> {
        self.records
            .lock()
            .map_err(|_| AppError::Knowledge("Memory store lock poisoned".to_string()))
    }
}

impl VectorStore for MemoryStore {
    fn append(&self, records: Vec<PendingRecord>) -> AppResult<Vec<String>> {
        let mut stored = self.lock()?;

        let existing = stored.first().map(|r| r.embedding.len());
        check_dimensions(existing, &records)?;

        let base = stored.len();
        let ingested_at = Utc::now();
        let mut ids = Vec::with_capacity(records.len());

        for (i, record) in records.into_iter().enumerate() {
            let id = format_record_id(base + i);
            ids.push(id.clone());
            stored.push(StoredRecord {
                id,
                embedding: record.embedding,
                document: record.document,
                metadata: record.metadata,
                ingested_at,
            });
        }

        Ok(ids)
    }

    fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> AppResult<Vec<(StoredRecord, f32)>> {
        let records = self.lock()?.clone();
        Ok(rank_records(records, query_embedding, top_k))
    }

    fn count(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    fn dimensions(&self) -> AppResult<Option<usize>> {
        Ok(self.lock()?.first().map(|r| r.embedding.len()))
    }

    fn last_ingested_at(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.lock()?.last().map(|r| r.ingested_at))
    }
}
