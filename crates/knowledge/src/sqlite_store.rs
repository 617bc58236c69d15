//! SQLite-backed vector store for news collections.

use crate::types::{ArticleMetadata, PendingRecord, StoredRecord};
use crate::vector_store::{check_dimensions, format_record_id, rank_records, VectorStore};
use chrono::{DateTime, Utc};
use newsrag_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// A collection persisted in a single SQLite file.
///
/// Similarity search is brute force over every row; embeddings are stored
/// as little-endian `f32` blobs.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Knowledge(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Knowledge(format!("Failed to open SQLite store: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                seq INTEGER PRIMARY KEY,
                id TEXT NOT NULL UNIQUE,
                document TEXT NOT NULL,
                embedding BLOB NOT NULL,
                dimensions INTEGER NOT NULL,
                source TEXT NOT NULL,
                title TEXT NOT NULL,
                ingested_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Knowledge(format!("Failed to create tables: {}", e)))?;

        tracing::debug!("Opened SQLite store at {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Knowledge("SQLite store lock poisoned".to_string()))
    }
}

fn count_records(conn: &Connection) -> AppResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get::<_, i64>(0))
        .map(|v| v as usize)
        .map_err(|e| AppError::Knowledge(format!("Failed to count records: {}", e)))
}

fn stored_dimensions(conn: &Connection) -> AppResult<Option<usize>> {
    conn.query_row("SELECT dimensions FROM records LIMIT 1", [], |row| {
        row.get::<_, i64>(0)
    })
    .optional()
    .map(|v| v.map(|d| d as usize))
    .map_err(|e| AppError::Knowledge(format!("Failed to read dimensions: {}", e)))
}

impl VectorStore for SqliteStore {
    fn append(&self, records: Vec<PendingRecord>) -> AppResult<Vec<String>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.lock()?;

        // Write lock up front: the count read below must not change before
        // the inserts land, even when another process shares the file.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| AppError::Knowledge(format!("Failed to begin transaction: {}", e)))?;

        let base = count_records(&tx)?;
        check_dimensions(stored_dimensions(&tx)?, &records)?;

        let ingested_at = Utc::now().to_rfc3339();
        let mut ids = Vec::with_capacity(records.len());

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO records (id, document, embedding, dimensions, source, title, ingested_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(|e| AppError::Knowledge(format!("Failed to prepare insert: {}", e)))?;

            for (i, record) in records.iter().enumerate() {
                let id = format_record_id(base + i);
                stmt.execute(params![
                    id,
                    record.document,
                    embedding_to_bytes(&record.embedding),
                    record.embedding.len() as i64,
                    record.metadata.source,
                    record.metadata.title,
                    ingested_at,
                ])
                .map_err(|e| AppError::Knowledge(format!("Failed to insert record {}: {}", id, e)))?;
                ids.push(id);
            }
        }

        tx.commit()
            .map_err(|e| AppError::Knowledge(format!("Failed to commit records: {}", e)))?;

        tracing::debug!("Appended {} records starting at doc_{}", ids.len(), base);
        Ok(ids)
    }

    fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> AppResult<Vec<(StoredRecord, f32)>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, document, embedding, source, title, ingested_at FROM records ORDER BY seq",
            )
            .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })
            .map_err(|e| AppError::Knowledge(format!("Failed to query records: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let (id, document, embedding, source, title, ingested_at) =
                row.map_err(|e| AppError::Knowledge(format!("Failed to read record: {}", e)))?;

            records.push(StoredRecord {
                id,
                embedding: bytes_to_embedding(&embedding)?,
                document,
                metadata: ArticleMetadata { source, title },
                ingested_at: parse_timestamp(&ingested_at)?,
            });
        }

        let results = rank_records(records, query_embedding, top_k);

        tracing::debug!(
            "Retrieved {} records (requested top-{})",
            results.len(),
            top_k
        );

        Ok(results)
    }

    fn count(&self) -> AppResult<usize> {
        let conn = self.lock()?;
        count_records(&conn)
    }

    fn dimensions(&self) -> AppResult<Option<usize>> {
        let conn = self.lock()?;
        stored_dimensions(&conn)
    }

    fn last_ingested_at(&self) -> AppResult<Option<DateTime<Utc>>> {
        let conn = self.lock()?;
        let latest: Option<String> = conn
            .query_row(
                "SELECT ingested_at FROM records ORDER BY seq DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Knowledge(format!("Failed to read timestamp: {}", e)))?;

        latest.as_deref().map(parse_timestamp).transpose()
    }
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Knowledge(format!("Invalid timestamp '{}': {}", value, e)))
}

/// Convert embedding vector to bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert bytes back to embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Knowledge(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn pending(document: &str, embedding: Vec<f32>) -> PendingRecord {
        PendingRecord {
            embedding,
            document: document.to_string(),
            metadata: ArticleMetadata {
                source: "Reuters".to_string(),
                title: document.to_string(),
            },
        }
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("news.sqlite");
        let store = SqliteStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.dimensions().unwrap(), None);
        assert!(store.last_ingested_at().unwrap().is_none());
    }

    #[test]
    fn test_append_and_search() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(&temp.path().join("news.sqlite")).unwrap();

        let ids = store
            .append(vec![
                pending("chip rally", vec![1.0, 0.0, 0.0]),
                pending("oil slump", vec![0.0, 1.0, 0.0]),
            ])
            .unwrap();
        assert_eq!(ids, vec!["doc_0", "doc_1"]);

        let results = store.search(&[1.0, 0.1, 0.0], 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.id, "doc_0");
        assert_eq!(results[0].0.document, "chip rally");
        assert_eq!(results[0].0.metadata.source, "Reuters");
        assert_eq!(results[0].0.embedding, vec![1.0, 0.0, 0.0]);
        assert!(results[0].1 > results[1].1);
    }

    #[test]
    fn test_ids_continue_from_count() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(&temp.path().join("news.sqlite")).unwrap();

        store.append(vec![pending("a", vec![1.0, 0.0])]).unwrap();
        let ids = store
            .append(vec![pending("b", vec![0.0, 1.0]), pending("a", vec![1.0, 0.0])])
            .unwrap();

        assert_eq!(ids, vec!["doc_1", "doc_2"]);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("news.sqlite");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.append(vec![pending("a", vec![0.5, 0.5])]).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.dimensions().unwrap(), Some(2));
        assert!(store.last_ingested_at().unwrap().is_some());

        let ids = store.append(vec![pending("b", vec![0.1, 0.9])]).unwrap();
        assert_eq!(ids, vec!["doc_1"]);
    }

    #[test]
    fn test_dimension_mismatch_rejected_atomically() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(&temp.path().join("news.sqlite")).unwrap();
        store.append(vec![pending("a", vec![1.0, 0.0])]).unwrap();

        let err = store
            .append(vec![pending("b", vec![1.0, 0.0]), pending("c", vec![1.0, 0.0, 0.0])])
            .unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_search_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(&temp.path().join("news.sqlite")).unwrap();
        assert!(store.search(&[1.0, 0.0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends_unique_ids() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SqliteStore::open(&temp.path().join("news.sqlite")).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .append(vec![
                            pending(&format!("t{}-a", t), vec![1.0, 0.0]),
                            pending(&format!("t{}-b", t), vec![0.0, 1.0]),
                        ])
                        .unwrap()
                })
            })
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 16);
        assert_eq!(store.count().unwrap(), 16);
    }

    #[test]
    fn test_embedding_bytes_round_trip() {
        let embedding = vec![0.25, -1.5, 3.0];
        let bytes = embedding_to_bytes(&embedding);
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytes_to_embedding(&bytes).unwrap(), embedding);
        assert!(bytes_to_embedding(&[0, 1, 2]).is_err());
    }
}
