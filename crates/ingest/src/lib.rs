pub mod document;

pub use document::chunker::{chunk_document, chunk_fragments, ChunkConfig, TextChunk};
pub use document::{
    extract_text, ingest_document, ingest_file, DocumentFormat, ExtractedDocument,
    ExtractionError, Extractor, JoinRule, TextFragment,
};
