use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Turn textbook documents into chunks for quiz generation, and generated
/// quizzes into printable PDFs.
#[derive(Parser, Debug)]
#[command(name = "quizgen", about = "Textbook quiz and flashcard tooling")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract text from a pdf, docx or txt file and print its chunks as JSON
    Chunk {
        /// Document to chunk
        file: PathBuf,

        /// Chunk threshold in characters (overrides CHUNK_MAX_CHARS)
        #[arg(long)]
        max_chars: Option<usize>,

        /// Also write chunks.json to the response directory
        #[arg(long)]
        save: bool,
    },

    /// Render a quiz JSON file to a PDF with an answer key
    Export {
        /// Either `[[metadata, choices], ...]` pairs or a `{"all": [...]}` quiz result
        input: PathBuf,

        /// Output path (default: <response_dir>/export.pdf)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Concatenate per-chunk generation results into one file
    Merge {
        /// Which kind of result the inputs hold
        #[arg(long, value_enum)]
        kind: MergeKind,

        /// Result files, merged in the order given
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print the resolved configuration
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Quiz,
    Flashcards,
}

impl MergeKind {
    /// File written to the response directory.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            MergeKind::Quiz => "quiz.json",
            MergeKind::Flashcards => "flashcards.json",
        }
    }
}
