//! Word-budget chunking engine.
//!
//! Splits text into contiguous runs of at most `max_words` whitespace-delimited
//! words so each piece fits under a downstream model's input ceiling.
//! Boundaries are chosen purely by word count; sentences and paragraphs may
//! straddle two chunks.

mod types;

pub use types::{Chunk, ChunkConfig};

/// Split `text` into ordered chunks of at most `max_words` words.
///
/// Words are joined back with single spaces, so the original whitespace
/// layout is not preserved but the token sequence is. A `max_words` of 0 is
/// treated as 1. Empty or whitespace-only input yields no chunks.
pub fn chunk(text: &str, max_words: usize) -> Vec<Chunk> {
    let budget = max_words.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(budget)
        .enumerate()
        .map(|(index, group)| Chunk {
            index,
            content: group.join(" "),
            word_count: group.len(),
        })
        .collect()
}

/// Same as [`chunk`] but returns only the chunk texts.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<String> {
    chunk(text, max_words)
        .into_iter()
        .map(|c| c.content)
        .collect()
}

/// Chunk using the configured word budget.
pub fn chunk_with(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    chunk(text, config.max_words)
}
