use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No records to export")]
    NoRecords,

    #[error("Record {index}: correct answer {answer:?} is not among the choices")]
    AnswerNotFound { index: usize, answer: String },

    #[error("Record {index}: expected 4 choices, found {found}")]
    ChoiceCount { index: usize, found: usize },

    #[error("Record {index}: character {ch:?} cannot be encoded in the PDF font")]
    Unencodable { index: usize, ch: char },

    #[error("Title: character {ch:?} cannot be encoded in the PDF font")]
    InvalidTitle { ch: char },

    #[error("Record {index} does not fit on page {page}")]
    PageOverflow { index: usize, page: usize },

    #[error("PDF write failed: {0}")]
    Pdf(String),
}

impl RenderError {
    /// Index of the offending record, when the fault belongs to one.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::AnswerNotFound { index, .. }
            | Self::ChoiceCount { index, .. }
            | Self::Unencodable { index, .. }
            | Self::PageOverflow { index, .. } => Some(*index),
            Self::NoRecords | Self::InvalidTitle { .. } | Self::Pdf(_) => None,
        }
    }
}
