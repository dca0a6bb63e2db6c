//! Chunk configuration and output types.

use serde::Serialize;

use quizgen_core::config::ChunkingConfig;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// A chunk is emitted once the accumulator is longer than this many
    /// characters (default: 2000).
    pub max_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 2000,
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            max_chunk_chars: config.max_chunk_chars,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A block of document text submitted to generation as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
}

impl TextChunk {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
