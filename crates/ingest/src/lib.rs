//! Text extraction and word-budget chunking for uploaded documents.

pub mod chunker;
pub mod document;

pub use chunker::{chunk, chunk_with, chunk_words, Chunk, ChunkConfig};
pub use document::{extract_text, ExtractedDocument, ExtractionError, PageContent};
