// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overlapping fixed-size text windows.
//!
//! Sizes are counted in Unicode scalar values, never bytes, so a window can
//! never split a multi-byte character.

use docent_config::model::IngestConfig;
use docent_core::{DocentError, DocumentChunk};

/// Splits text into windows of at most `size` characters where consecutive
/// windows share exactly `overlap` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// Rejects `size == 0` and `overlap >= size`, which could not make progress.
    pub fn new(size: usize, overlap: usize) -> Result<Self, DocentError> {
        if size == 0 {
            return Err(DocentError::Validation(
                "chunk size must be greater than 0".into(),
            ));
        }
        if overlap >= size {
            return Err(DocentError::Validation(format!(
                "chunk overlap ({overlap}) must be less than chunk size ({size})"
            )));
        }
        Ok(Self { size, overlap })
    }

    pub fn from_config(config: &IngestConfig) -> Result<Self, DocentError> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Splits `text` into chunks.
    ///
    /// Whitespace runs are first collapsed to a single character. A
    /// non-final chunk then ends before the last whitespace character in the
    /// back half of its window, or at the window edge when there is none.
    /// The next chunk starts `overlap` characters before that end.
    pub fn split(&self, text: &str) -> Vec<DocumentChunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars = collapse_whitespace(text);
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let hard_end = (start + self.size).min(len);
            let end = if hard_end < len {
                self.soft_end(&chars, start, hard_end)
            } else {
                len
            };

            // Every window spans at least `overlap + 1` chars, so a blank one
            // is only possible at overlap 0 where skipping it shares nothing.
            let piece: String = chars[start..end].iter().collect();
            if !piece.trim().is_empty() {
                chunks.push(DocumentChunk::new(piece));
            }

            if end == len {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }

    /// Picks the cut point for a window that does not reach the end of text.
    ///
    /// The cut is never earlier than `start + overlap + 1`, so the next
    /// window always starts after this one.
    fn soft_end(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + self.overlap + ((self.size - self.overlap) / 2).max(1);
        (floor..hard_end)
            .rev()
            .find(|&i| chars[i].is_whitespace())
            .unwrap_or(hard_end)
    }
}

/// Replaces each whitespace run with `'\n'` if it contains a line break,
/// otherwise with `' '`.
fn collapse_whitespace(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut run: Option<char> = None;

    for c in text.chars() {
        if c.is_whitespace() {
            let is_break = matches!(c, '\n' | '\r' | '\u{0C}');
            run = Some(match run {
                Some('\n') => '\n',
                _ if is_break => '\n',
                _ => ' ',
            });
        } else {
            if let Some(ws) = run.take() {
                out.push(ws);
            }
            out.push(c);
        }
    }
    if let Some(ws) = run {
        out.push(ws);
    }
    out
}
