// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reloadable shared handle to the persisted vector store.
//!
//! The slot may be empty when the store could not be opened at startup;
//! searches against an empty slot return no results instead of failing.
//! `reload` swaps in a freshly opened store. Readers that already loaded the
//! previous store finish against it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use docent_core::DocentError;
use tracing::{error, info};

use crate::store::VectorStore;
use crate::types::{NewChunk, ScoredChunk};

pub struct StoreHandle {
    persist_dir: Option<PathBuf>,
    slot: ArcSwapOption<VectorStore>,
}

impl StoreHandle {
    /// Opens the store under `persist_dir`. Failure is logged and leaves the
    /// slot empty.
    pub async fn open(persist_dir: impl Into<PathBuf>) -> Self {
        let persist_dir = persist_dir.into();
        let store = match VectorStore::open(&persist_dir).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                error!(
                    persist_dir = %persist_dir.display(),
                    error = %e,
                    "failed to open vector store, queries will see no results"
                );
                None
            }
        };
        Self {
            persist_dir: Some(persist_dir),
            slot: ArcSwapOption::new(store),
        }
    }

    /// Wraps an already-open store.
    pub fn from_store(store: VectorStore) -> Self {
        let persist_dir = store.path().and_then(Path::parent).map(Path::to_path_buf);
        Self {
            persist_dir,
            slot: ArcSwapOption::from_pointee(store),
        }
    }

    /// The store currently in the slot.
    pub fn current(&self) -> Option<Arc<VectorStore>> {
        self.slot.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.load().is_some()
    }

    pub fn persist_dir(&self) -> Option<&Path> {
        self.persist_dir.as_deref()
    }

    /// Similarity search against the current store; empty slot yields no results.
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, DocentError> {
        match self.current() {
            Some(store) => store.search(query, k).await,
            None => Ok(Vec::new()),
        }
    }

    /// Writes chunks, opening the store first if the slot is empty.
    pub async fn add_chunks(&self, chunks: Vec<NewChunk>) -> Result<usize, DocentError> {
        let store = match self.current() {
            Some(store) => store,
            None => {
                self.reload().await?;
                self.current().ok_or_else(|| {
                    DocentError::Internal("vector store unavailable after reload".into())
                })?
            }
        };
        store.add_chunks(chunks).await
    }

    /// Reopens the store from disk and swaps it in.
    ///
    /// On failure the previous store (if any) stays in place. In-memory
    /// handles have nothing on disk and are left unchanged.
    pub async fn reload(&self) -> Result<(), DocentError> {
        let Some(dir) = &self.persist_dir else {
            return Ok(());
        };
        match VectorStore::open(dir).await {
            Ok(store) => {
                self.slot.store(Some(Arc::new(store)));
                info!(persist_dir = %dir.display(), "vector store reloaded");
                Ok(())
            }
            Err(e) => {
                error!(persist_dir = %dir.display(), error = %e, "vector store reload failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> NewChunk {
        NewChunk {
            content: content.into(),
            embedding: vec![1.0, 0.0],
            source: "a.pdf".into(),
        }
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn unopenable_store_leaves_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("index");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let handle = StoreHandle::open(&blocker).await;
        assert!(!handle.is_loaded());
        assert!(handle.search(&[1.0, 0.0], 5).await.unwrap().is_empty());
        assert!(logs_contain("failed to open vector store"));
    }

    #[tokio::test]
    async fn reload_sees_writes_from_another_connection() {
        let dir = tempfile::tempdir().unwrap();
        let handle = StoreHandle::open(dir.path()).await;
        assert!(handle.is_loaded());

        let writer = VectorStore::open(dir.path()).await.unwrap();
        writer.add_chunks(vec![chunk("fresh")]).await.unwrap();

        handle.reload().await.unwrap();
        let results = handle.search(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "fresh");
    }

    #[tokio::test]
    async fn previously_loaded_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let handle = StoreHandle::open(dir.path()).await;
        let before = handle.current().unwrap();
        handle.reload().await.unwrap();
        let after = handle.current().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        // The old store is still usable by whoever holds it.
        assert_eq!(before.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_chunks_opens_empty_slot_when_possible() {
        let dir = tempfile::tempdir().unwrap();
        let handle = StoreHandle {
            persist_dir: Some(dir.path().to_path_buf()),
            slot: ArcSwapOption::empty(),
        };
        assert_eq!(handle.add_chunks(vec![chunk("x")]).await.unwrap(), 1);
        assert!(handle.is_loaded());
    }

    #[tokio::test]
    async fn in_memory_reload_is_noop() {
        let store = VectorStore::open_in_memory().await.unwrap();
        store.add_chunks(vec![chunk("kept")]).await.unwrap();
        let handle = StoreHandle::from_store(store);
        assert!(handle.persist_dir().is_none());
        handle.reload().await.unwrap();
        assert_eq!(handle.search(&[1.0, 0.0], 1).await.unwrap().len(), 1);
    }
}
