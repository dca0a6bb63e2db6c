use serde::{Deserialize, Serialize};

/// One multiple-choice question as produced by quiz generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

/// A key concept and its one-sentence definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub concept: String,
    pub definition: String,
}

/// Envelope returned by one generation call (`{"all": [...]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult<T> {
    pub all: Vec<T>,
}

impl<T> Default for GenerationResult<T> {
    fn default() -> Self {
        Self { all: Vec::new() }
    }
}

impl<T> GenerationResult<T> {
    /// Concatenate per-chunk results, preserving chunk order.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = GenerationResult<T>>,
    {
        let all = parts.into_iter().flat_map(|part| part.all).collect();
        Self { all }
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

pub type QuizResult = GenerationResult<QuestionRecord>;
pub type FlashcardResult = GenerationResult<Flashcard>;

/// A record paired with its answer choices in display order.
///
/// Serialized as a two-element array `[metadata, choices]`, the shape the
/// export step receives from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem(pub QuestionRecord, pub Vec<String>);

impl ExportItem {
    pub fn new(record: QuestionRecord, choices: Vec<String>) -> Self {
        Self(record, choices)
    }

    /// Build display choices for the `index`-th record by placing the correct
    /// answer at position `index % (incorrect + 1)`, distractors in order
    /// around it.
    pub fn from_record(index: usize, record: QuestionRecord) -> Self {
        let mut choices = record.incorrect_answers.clone();
        let slot = index % (choices.len() + 1);
        choices.insert(slot, record.correct_answer.clone());
        Self(record, choices)
    }

    pub fn record(&self) -> &QuestionRecord {
        &self.0
    }

    pub fn choices(&self) -> &[String] {
        &self.1
    }

    /// 0-based position of the correct answer among the choices (exact match).
    pub fn correct_index(&self) -> Option<usize> {
        self.1.iter().position(|c| *c == self.0.correct_answer)
    }
}
