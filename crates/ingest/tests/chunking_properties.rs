//! Property-based tests for the word-budget chunker.
//!
//! Invariants checked across arbitrary whitespace-laden text:
//! token sequence is reconstructed exactly, every chunk is non-empty and
//! within budget, and chunking is deterministic.

use docubot_ingest::{chunk, chunk_words};
use proptest::prelude::*;

/// Text built from short words separated by random whitespace runs.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop::string::string_regex(r"[A-Za-z0-9.,!?'\-]{1,12}").unwrap(),
            prop::sample::select(vec![" ", "  ", "\n", "\t", "\n\n", " \r\n "]),
        ),
        0..400,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, sep)| format!("{word}{sep}"))
            .collect::<String>()
    })
}

proptest! {
    #[test]
    fn rejoined_chunks_reconstruct_token_sequence(text in text_strategy(), max_words in 1usize..64) {
        let chunks = chunk_words(&text, max_words);
        let rejoined = chunks.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        let rebuilt: Vec<&str> = rejoined.split_whitespace().collect();
        prop_assert_eq!(original, rebuilt);
    }

    #[test]
    fn every_chunk_is_within_budget_and_non_empty(text in text_strategy(), max_words in 1usize..64) {
        let chunks = chunk(&text, max_words);
        for (i, c) in chunks.iter().enumerate() {
            prop_assert_eq!(c.index, i);
            prop_assert!(c.word_count >= 1);
            prop_assert!(c.word_count <= max_words);
            prop_assert_eq!(c.content.split_whitespace().count(), c.word_count);
        }
        // Only the last chunk may be short.
        if chunks.len() > 1 {
            for c in &chunks[..chunks.len() - 1] {
                prop_assert_eq!(c.word_count, max_words);
            }
        }
        prop_assert_eq!(chunks.is_empty(), text.split_whitespace().next().is_none());
    }

    #[test]
    fn chunking_is_deterministic(text in text_strategy(), max_words in 1usize..64) {
        prop_assert_eq!(chunk(&text, max_words), chunk(&text, max_words));
    }
}

#[test]
fn repeated_word_scenario() {
    let text = "word ".repeat(1200);
    let sizes: Vec<usize> = chunk(&text, 500).iter().map(|c| c.word_count).collect();
    assert_eq!(sizes, vec![500, 500, 200]);
}
