//! Printable quiz export.
//!
//! Lays question records out as a question section and an answer-key section
//! on fixed-size pages, then writes the pages as a PDF.

mod encoding;
pub mod error;
pub mod geometry;
pub mod layout;
mod pdf;
mod renderer;
mod wrap;

pub use error::RenderError;
pub use geometry::PageGeometry;
pub use layout::{Block, Page, Section};
pub use renderer::{PageRenderer, RenderedDocument};
