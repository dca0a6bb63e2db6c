pub mod chunker;
mod docx;
mod pdf;
mod txt;

use std::path::Path;

use thiserror::Error;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use txt::TextExtractor;

use chunker::{chunk_document, ChunkConfig, TextChunk};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("Text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One unit of extracted text: a PDF page, a docx paragraph, or a text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// 0-based position in source order.
    pub position: usize,
    pub text: String,
}

impl TextFragment {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// How fragments are merged into the chunk accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRule {
    /// Append, then collapse whitespace across the whole accumulator.
    NormalizeWhitespace,
    /// Append verbatim with no separator.
    Concatenate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["pdf", "docx", "txt"];

    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return Err(ExtractionError::UnsupportedFormat(filename.to_string())),
        };
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Text),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
        }
    }

    /// The extractor responsible for this format.
    pub fn extractor(&self) -> &'static dyn Extractor {
        match self {
            Self::Pdf => &PdfExtractor,
            Self::Docx => &DocxExtractor,
            Self::Text => &TextExtractor,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format-specific text extraction.
pub trait Extractor: Send + Sync {
    /// Split raw file bytes into fragments, preserving document order.
    fn extract(&self, bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError>;

    /// How this format's fragments are joined while chunking.
    fn join_rule(&self) -> JoinRule;
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    pub format: DocumentFormat,
    /// Fragments in source order.
    pub fragments: Vec<TextFragment>,
}

impl ExtractedDocument {
    pub fn join_rule(&self) -> JoinRule {
        self.format.extractor().join_rule()
    }

    /// Total character count across all fragments.
    pub fn total_chars(&self) -> usize {
        self.fragments.iter().map(|f| f.text.chars().count()).sum()
    }
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let format = DocumentFormat::from_filename(filename)?;
    let fragments = format.extractor().extract(bytes)?;
    tracing::debug!(
        filename,
        format = %format,
        fragments = fragments.len(),
        "extracted document"
    );

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        format,
        fragments,
    })
}

/// Extract and chunk an in-memory document.
pub fn ingest_document(
    bytes: &[u8],
    filename: &str,
    config: &ChunkConfig,
) -> Result<Vec<TextChunk>, ExtractionError> {
    let doc = extract_text(bytes, filename)?;
    let chunks = chunk_document(&doc, config);
    tracing::info!(
        filename,
        chars = doc.total_chars(),
        chunks = chunks.len(),
        "chunked document"
    );
    Ok(chunks)
}

/// Read and chunk a document from disk. The extension is checked before the
/// file is opened.
pub fn ingest_file(path: &Path, config: &ChunkConfig) -> Result<Vec<TextChunk>, ExtractionError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    DocumentFormat::from_filename(filename)?;
    let bytes = std::fs::read(path)?;
    ingest_document(&bytes, filename, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_formats() {
        assert_eq!(DocumentFormat::from_filename("notes.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("Essay.DOCX").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_filename("a.b.txt").unwrap(), DocumentFormat::Text);
    }

    #[test]
    fn rejects_unsupported_formats() {
        for name in ["slides.pptx", "README.md", "noextension", "archive.txt.zip"] {
            let err = DocumentFormat::from_filename(name).unwrap_err();
            assert!(matches!(err, ExtractionError::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn join_rules_per_format() {
        assert_eq!(DocumentFormat::Pdf.extractor().join_rule(), JoinRule::NormalizeWhitespace);
        assert_eq!(DocumentFormat::Docx.extractor().join_rule(), JoinRule::Concatenate);
        assert_eq!(DocumentFormat::Text.extractor().join_rule(), JoinRule::Concatenate);
    }

    #[test]
    fn ingest_text_document() {
        let config = ChunkConfig { max_chunk_chars: 10 };
        let chunks = ingest_document(b"first line\nsecond\nthird\n", "notes.txt", &config).unwrap();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first line\n", "second\nthird\n", ""]);
    }

    #[test]
    fn ingest_rejects_before_parsing() {
        let err = ingest_document(b"%PDF garbage", "doc.odt", &ChunkConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref e) if e == "odt"));
    }

    #[test]
    fn ingest_file_checks_extension_before_reading() {
        let missing = Path::new("/definitely/not/here/file.exe");
        let err = ingest_file(missing, &ChunkConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));

        let missing_txt = Path::new("/definitely/not/here/file.txt");
        let err = ingest_file(missing_txt, &ChunkConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn corrupt_pdf_is_an_extraction_failure() {
        let err = extract_text(b"this is not a pdf", "broken.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn corrupt_docx_is_an_extraction_failure() {
        let err = extract_text(b"PK\x03\x04 not really a zip", "broken.docx").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }
}
