// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index record types and vector helpers.

use serde::{Deserialize, Serialize};

/// A chunk ready to be written: its text, embedding, and source file name.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChunk {
    pub content: String,
    pub embedding: Vec<f32>,
    pub source: String,
}

/// A chunk returned from similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub id: i64,
    pub content: String,
    pub source: String,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub score: f32,
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionReport {
    /// Documents whose text was extracted.
    pub documents_loaded: usize,
    /// Documents skipped because extraction failed.
    pub documents_skipped: usize,
    /// Chunks embedded and written to the store.
    pub chunks_added: usize,
}

/// Convert f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert SQLite BLOB back to f32 vector. Trailing partial bytes are ignored.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_to_blob_roundtrip() {
        let original = vec![1.0f32, -2.5, 3.25, 0.0];
        let blob = vec_to_blob(&original);
        assert_eq!(blob.len(), 16);
        assert_eq!(blob_to_vec(&blob), original);
    }

    #[test]
    fn blob_to_vec_ignores_trailing_bytes() {
        let mut blob = vec_to_blob(&[1.0]);
        blob.push(0xff);
        assert_eq!(blob_to_vec(&blob), vec![1.0]);
    }

    #[test]
    fn cosine_similarity_identical_unnormalized() {
        let a = vec![3.0, 4.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 1.0], &[-2.0, -2.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
