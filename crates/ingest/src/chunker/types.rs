//! Chunk configuration and output types.

use serde::Serialize;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum words per chunk (default: 500).
    pub max_words: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { max_words: 500 }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A contiguous, word-bounded slice of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 0-based position in the chunk sequence.
    pub index: usize,
    /// Words of this chunk joined by single spaces.
    pub content: String,
    pub word_count: usize,
}
