// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed vector store with embeddings stored as BLOBs.
//!
//! Search is a linear cosine scan over every stored chunk.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use docent_core::error::DocentError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::types::{NewChunk, ScoredChunk, blob_to_vec, cosine_similarity, vec_to_blob};

/// File name of the index inside the persist directory.
pub const INDEX_FILE: &str = "index.sqlite3";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS chunks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        embedding BLOB NOT NULL,
        source TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source);";

/// Helper to convert tokio_rusqlite errors into DocentError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> DocentError {
    DocentError::Storage {
        source: Box::new(e),
    }
}

/// Persistent store for embedded chunks in SQLite.
pub struct VectorStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl VectorStore {
    /// Opens (creating if needed) `<persist_dir>/index.sqlite3`.
    pub async fn open(persist_dir: &Path) -> Result<Self, DocentError> {
        tokio::fs::create_dir_all(persist_dir)
            .await
            .map_err(DocentError::storage)?;
        let path = persist_dir.join(INDEX_FILE);
        let conn = Connection::open(&path).await.map_err(|e| DocentError::Storage {
            source: Box::new(e),
        })?;
        let store = Self {
            conn,
            path: Some(path),
        };
        store.init_schema().await?;
        info!(path = %persist_dir.join(INDEX_FILE).display(), "vector store opened");
        Ok(store)
    }

    /// Opens a throwaway in-memory store.
    pub async fn open_in_memory() -> Result<Self, DocentError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| DocentError::Storage {
                source: Box::new(e),
            })?;
        let store = Self { conn, path: None };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), DocentError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    /// Database file backing this store, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes all chunks in a single transaction. Returns the number written.
    pub async fn add_chunks(&self, chunks: Vec<NewChunk>) -> Result<usize, DocentError> {
        if chunks.is_empty() {
            return Ok(0);
        }
        let created_at = chrono::Utc::now().to_rfc3339();

        let written = self
            .conn
            .call(move |conn| -> Result<usize, rusqlite::Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO chunks (content, embedding, source, created_at) VALUES (?1, ?2, ?3, ?4)",
                    )?;
                    for chunk in &chunks {
                        stmt.execute(rusqlite::params![
                            chunk.content,
                            vec_to_blob(&chunk.embedding),
                            chunk.source,
                            created_at,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(chunks.len())
            })
            .await
            .map_err(storage_err)?;

        debug!(written, "chunks written");
        Ok(written)
    }

    /// Returns the `k` chunks most similar to `query`, most similar first.
    ///
    /// Equal scores are ordered by insertion. Rows whose embedding
    /// dimension differs from the query are skipped.
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, DocentError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let query = query.to_vec();

        self.conn
            .call(move |conn| -> Result<Vec<ScoredChunk>, rusqlite::Error> {
                let mut stmt =
                    conn.prepare("SELECT id, content, embedding, source FROM chunks ORDER BY id")?;
                let mut rows = stmt.query([])?;
                let mut scored = Vec::new();
                while let Some(row) = rows.next()? {
                    let blob: Vec<u8> = row.get(2)?;
                    let embedding = blob_to_vec(&blob);
                    if embedding.len() != query.len() {
                        continue;
                    }
                    scored.push(ScoredChunk {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        source: row.get(3)?,
                        score: cosine_similarity(&query, &embedding),
                    });
                }
                scored.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(Ordering::Equal)
                        .then(a.id.cmp(&b.id))
                });
                scored.truncate(k);
                Ok(scored)
            })
            .await
            .map_err(storage_err)
    }

    /// Number of stored chunks.
    pub async fn count(&self) -> Result<usize, DocentError> {
        self.conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            })
            .await
            .map(|n| n as usize)
            .map_err(storage_err)
    }

    /// Distinct source file names, sorted.
    pub async fn sources(&self) -> Result<Vec<String>, DocentError> {
        self.conn
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare("SELECT DISTINCT source FROM chunks ORDER BY source")?;
                let sources = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(sources)
            })
            .await
            .map_err(storage_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, embedding: Vec<f32>) -> NewChunk {
        NewChunk {
            content: content.to_string(),
            embedding,
            source: "handbook.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_store_search_returns_nothing() {
        let store = VectorStore::open_in_memory().await.unwrap();
        assert!(store.search(&[1.0, 0.0], 5).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_and_count() {
        let store = VectorStore::open_in_memory().await.unwrap();
        let written = store
            .add_chunks(vec![chunk("a", vec![1.0, 0.0]), chunk("b", vec![0.0, 1.0])])
            .await
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn add_empty_is_noop() {
        let store = VectorStore::open_in_memory().await.unwrap();
        assert_eq!(store.add_chunks(vec![]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_orders_by_similarity_and_truncates() {
        let store = VectorStore::open_in_memory().await.unwrap();
        store
            .add_chunks(vec![
                chunk("far", vec![0.0, 1.0]),
                chunk("near", vec![1.0, 0.1]),
                chunk("exact", vec![2.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        let contents: Vec<_> = results.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["exact", "near"]);
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[0].source, "handbook.pdf");
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = VectorStore::open_in_memory().await.unwrap();
        store
            .add_chunks(vec![
                chunk("first", vec![1.0, 0.0]),
                chunk("second", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();
        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(results[0].content, "first");
        assert_eq!(results[1].content, "second");
    }

    #[tokio::test]
    async fn mismatched_dimensions_are_skipped() {
        let store = VectorStore::open_in_memory().await.unwrap();
        store
            .add_chunks(vec![chunk("3d", vec![1.0, 0.0, 0.0]), chunk("2d", vec![1.0, 0.0])])
            .await
            .unwrap();
        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "2d");
    }

    #[tokio::test]
    async fn open_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let persist = dir.path().join("nested").join("index");
        {
            let store = VectorStore::open(&persist).await.unwrap();
            store.add_chunks(vec![chunk("kept", vec![1.0])]).await.unwrap();
            assert_eq!(store.path(), Some(persist.join(INDEX_FILE).as_path()));
        }
        let reopened = VectorStore::open(&persist).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        assert_eq!(reopened.sources().await.unwrap(), vec!["handbook.pdf"]);
    }
}
