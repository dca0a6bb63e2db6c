//! Physical page dimensions and vertical rhythm, in PDF points.

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Height of a regular text line.
pub const LINE_HEIGHT: f32 = 5.0 * MM;
/// Height of an answer-key entry.
pub const ANSWER_LINE_HEIGHT: f32 = 8.0 * MM;
/// Gap after a page header and after each question.
pub const SECTION_GAP: f32 = 10.0 * MM;
/// Left offset of answer choices relative to the margin.
pub const CHOICE_INDENT: f32 = 10.0 * MM;
/// Width reserved for a choice label (`a.`) before its text.
pub const CHOICE_LABEL_WIDTH: f32 = 6.0 * MM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with 10 mm margins.
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
        margin: 10.0 * MM,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}
