use quizgen_core::config::ExportConfig;
use quizgen_core::record::ExportItem;
use quizgen_core::text::sanitize;

use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::layout::{Layout, Page, Section};
use crate::pdf::write_pdf;

/// A finished export, held in memory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub question_pages: usize,
    pub answer_key_pages: usize,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.question_pages + self.answer_key_pages
    }
}

/// Renders question records into a quiz PDF with an answer key.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    config: ExportConfig,
    geometry: PageGeometry,
}

impl PageRenderer {
    pub fn new(config: &ExportConfig) -> Self {
        Self::with_geometry(config, PageGeometry::LETTER)
    }

    pub fn with_geometry(config: &ExportConfig, geometry: PageGeometry) -> Self {
        Self {
            config: config.validated(),
            geometry,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Lay out both sections without producing PDF bytes.
    pub fn layout(&self, items: &[ExportItem]) -> Result<Vec<Page>, RenderError> {
        if items.is_empty() {
            return Err(RenderError::NoRecords);
        }
        Layout {
            config: &self.config,
            geometry: &self.geometry,
        }
        .pages(items)
    }

    /// Render `items` to PDF. Any faulty record aborts the whole render.
    pub fn render(&self, items: &[ExportItem]) -> Result<RenderedDocument, RenderError> {
        let pages = self.layout(items).inspect_err(|e| {
            tracing::warn!(error = %e, record = ?e.record_index(), "quiz layout failed");
        })?;

        let title = sanitize(&self.config.title);
        let bytes = write_pdf(&pages, &self.geometry, self.config.font_size, &title)?;

        let question_pages = pages.iter().filter(|p| p.section == Section::Questions).count();
        let doc = RenderedDocument {
            bytes,
            question_pages,
            answer_key_pages: pages.len() - question_pages,
        };
        tracing::info!(
            records = items.len(),
            pages = doc.page_count(),
            bytes = doc.bytes.len(),
            "rendered quiz export"
        );
        Ok(doc)
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}
