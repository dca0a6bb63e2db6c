//! Threshold chunking engine.
//!
//! Folds a document's fragments into an accumulator and flushes it as a chunk
//! whenever it grows past the configured character limit. The join rule
//! (verbatim concatenation or whitespace normalization) comes from the
//! document's format.

mod helpers;
mod strategies;
mod types;

pub use strategies::{chunk_document, chunk_fragments};
pub use types::{ChunkConfig, TextChunk};
