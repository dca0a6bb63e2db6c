//! PDF serialization of laid-out pages via `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::encoding;
use crate::error::RenderError;
use crate::geometry::{PageGeometry, ANSWER_LINE_HEIGHT, CHOICE_INDENT, CHOICE_LABEL_WIDTH, LINE_HEIGHT};
use crate::layout::{Block, FontStyle, Page};
use crate::wrap::text_width;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Writes text lines top-down onto one page's content stream.
struct PageWriter<'a> {
    geometry: &'a PageGeometry,
    font_size: f32,
    /// Top edge of the next line, in PDF coordinates.
    cursor: f32,
    ops: Vec<Operation>,
}

impl<'a> PageWriter<'a> {
    fn new(geometry: &'a PageGeometry, font_size: f32) -> Self {
        Self {
            geometry,
            font_size,
            cursor: geometry.height - geometry.margin,
            ops: Vec::new(),
        }
    }

    /// Place `text` on a line of `height`, vertically centred like a table cell.
    fn text_at(&mut self, x: f32, height: f32, style: FontStyle, text: &str) -> Result<(), RenderError> {
        let bytes = encoding::encode(text)
            .map_err(|ch| RenderError::Pdf(format!("unencodable character {ch:?}")))?;
        let font = match style {
            FontStyle::Regular => REGULAR_FONT,
            FontStyle::Bold => BOLD_FONT,
        };
        let baseline = self.cursor - (0.5 * height + 0.3 * self.font_size);
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), real(self.font_size)]),
            Operation::new("Td", vec![real(x), real(baseline)]),
            Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn line(&mut self, x: f32, height: f32, style: FontStyle, text: &str) -> Result<(), RenderError> {
        self.text_at(x, height, style, text)?;
        self.cursor -= height;
        Ok(())
    }

    fn block(&mut self, block: &Block) -> Result<(), RenderError> {
        let left = self.geometry.margin;
        match block {
            Block::PageNumber(n) => {
                let label = n.to_string();
                let width = text_width(&label, self.font_size, FontStyle::Regular);
                let x = self.geometry.width - self.geometry.margin - width;
                self.line(x, LINE_HEIGHT, FontStyle::Regular, &label)?;
            }
            Block::Heading(text) => self.line(left, LINE_HEIGHT, FontStyle::Bold, text)?,
            Block::Line(text) => self.line(left, LINE_HEIGHT, FontStyle::Regular, text)?,
            Block::Question { lines, .. } => {
                for text in lines {
                    self.line(left, LINE_HEIGHT, FontStyle::Bold, text)?;
                }
                self.cursor -= LINE_HEIGHT;
            }
            Block::Choice { label, lines } => {
                let label_x = left + CHOICE_INDENT;
                self.text_at(label_x, LINE_HEIGHT, FontStyle::Regular, &format!("{label}."))?;
                for text in lines {
                    self.line(label_x + CHOICE_LABEL_WIDTH, LINE_HEIGHT, FontStyle::Regular, text)?;
                }
            }
            Block::AnswerKeyEntry { number, letter } => {
                let text = format!("{number}: ({letter})");
                self.line(left, ANSWER_LINE_HEIGHT, FontStyle::Bold, &text)?;
            }
            Block::Spacer(height) => self.cursor -= height,
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        Content { operations: self.ops }
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Serialize `pages` into a complete PDF file.
pub(crate) fn write_pdf(
    pages: &[Page],
    geometry: &PageGeometry,
    font_size: f32,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font("Times-Roman"));
    let bold_id = doc.add_object(font("Times-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut writer = PageWriter::new(geometry, font_size);
        for block in &page.blocks {
            writer.block(block)?;
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, writer.finish()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(geometry.width), real(geometry.height)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let title_bytes = encoding::encode(title).map_err(|ch| RenderError::InvalidTitle { ch })?;
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(title_bytes, StringFormat::Literal),
        "Producer" => Object::string_literal("quizgen"),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}
