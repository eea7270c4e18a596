//! Corpus statistics, readability, word clouds and export formats for an
//! extracted document. Everything here is pure and recomputed on demand.

pub mod export;
pub mod readability;
pub mod stats;
pub mod wordcloud;

pub use export::{stats_csv, summary_text, ExportError};
pub use readability::flesch_kincaid_grade;
pub use stats::{compute_stats, most_common_words, StatRecord, WordCount};
pub use wordcloud::{WordCloud, WordCloudConfig};
