//! Accumulator utilities used by the chunking fold.

use quizgen_core::text::normalize_whitespace;

use super::types::TextChunk;
use crate::document::JoinRule;

/// Whether `text` is longer than `max_chars` characters.
pub(crate) fn exceeds(text: &str, max_chars: usize) -> bool {
    // Byte length bounds the char count from above.
    text.len() > max_chars && text.chars().count() > max_chars
}

/// Append `fragment` to the accumulator according to `rule`.
pub(crate) fn append_fragment(mut acc: String, fragment: &str, rule: JoinRule) -> String {
    acc.push_str(fragment);
    match rule {
        JoinRule::Concatenate => acc,
        JoinRule::NormalizeWhitespace => normalize_whitespace(&acc),
    }
}

/// Push `content` as the next chunk, numbering it by position.
pub(crate) fn push_chunk(chunks: &mut Vec<TextChunk>, content: String) {
    chunks.push(TextChunk {
        index: chunks.len(),
        content,
    });
}
