//! Chunking entry points.

use super::helpers::{append_fragment, exceeds, push_chunk};
use super::types::{ChunkConfig, TextChunk};
use crate::document::{ExtractedDocument, JoinRule};

/// Chunk a document using the join rule of its format.
pub fn chunk_document(doc: &ExtractedDocument, config: &ChunkConfig) -> Vec<TextChunk> {
    chunk_fragments(
        doc.fragments.iter().map(|f| f.text.as_str()),
        doc.join_rule(),
        config.max_chunk_chars,
    )
}

/// Fold fragments into chunks, flushing whenever the accumulator exceeds
/// `max_chars`.
///
/// The trailing accumulator is always emitted, even when empty, so every
/// input (including one with no fragments) yields at least one chunk.
pub fn chunk_fragments<'a, I>(fragments: I, rule: JoinRule, max_chars: usize) -> Vec<TextChunk>
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut chunks, tail) = fragments.into_iter().fold(
        (Vec::new(), String::new()),
        |(mut chunks, acc), fragment| {
            let acc = append_fragment(acc, fragment, rule);
            if exceeds(&acc, max_chars) {
                push_chunk(&mut chunks, acc);
                (chunks, String::new())
            } else {
                (chunks, acc)
            }
        },
    );
    push_chunk(&mut chunks, tail);

    tracing::debug!(chunks = chunks.len(), max_chars, "chunked fragments");
    chunks
}
