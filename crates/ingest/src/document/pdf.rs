use std::panic::{self, AssertUnwindSafe};

use super::{ExtractionError, Extractor, JoinRule, TextFragment};

/// One fragment per page via `pdf-extract`.
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
        extract_pdf(bytes)
    }

    fn join_rule(&self) -> JoinRule {
        JoinRule::NormalizeWhitespace
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ExtractionError::Pdf("parser panicked on malformed input".to_string()))?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    if pages.iter().all(|page| page.trim().is_empty()) {
        // Scanned/image-only PDFs have no text layer.
        tracing::warn!(pages = pages.len(), "PDF contains no extractable text");
    }

    Ok(page_fragments(pages))
}

/// One fragment per page. Page text is kept untrimmed so the whitespace at
/// page boundaries survives into the accumulator.
fn page_fragments(pages: Vec<String>) -> Vec<TextFragment> {
    pages
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| TextFragment::new(i, page_text))
        .collect()
}
