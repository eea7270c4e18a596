//! Document statistics: counts, readability, and the word-frequency table.

use indexmap::IndexMap;
use serde::Serialize;

use crate::readability::flesch_kincaid_grade;

/// Number of entries in the frequency table shown next to the stats.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Derived metrics for one document. Always recomputed from the text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub character_count: usize,
    pub readability_grade: f64,
}

impl StatRecord {
    /// `(metric, value)` pairs in display/export order.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Words", self.word_count.to_string()),
            ("Sentences", self.sentence_count.to_string()),
            ("Paragraphs", self.paragraph_count.to_string()),
            ("Characters", self.character_count.to_string()),
            ("Readability Score", format!("{:.2}", self.readability_grade)),
        ]
    }
}

/// A token and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

pub fn compute_stats(text: &str) -> StatRecord {
    StatRecord {
        word_count: text.split_whitespace().count(),
        // Every terminator counts; "Wait..." is three sentences here.
        sentence_count: text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count(),
        paragraph_count: text.lines().filter(|line| !line.trim().is_empty()).count(),
        character_count: text.chars().count(),
        readability_grade: flesch_kincaid_grade(text),
    }
}

/// The `n` most frequent whitespace-delimited tokens.
///
/// Case- and punctuation-sensitive. Ties keep first-occurrence order.
pub fn most_common_words(text: &str, n: usize) -> Vec<WordCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in text.split_whitespace() {
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort keeps insertion order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(n)
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}
