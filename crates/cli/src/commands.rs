use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use quizgen_core::record::{ExportItem, GenerationResult, QuizResult};
use quizgen_core::{store, Config};
use quizgen_export::PageRenderer;
use quizgen_ingest::{ingest_file, ChunkConfig};

use crate::cli::MergeKind;

/// Chunk listing in the shape the generation client consumes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkResponse {
    pub text: Vec<String>,
}

/// Accepted shapes for the export input file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ExportInput {
    /// `[[metadata, choices], ...]` with choices already in display order.
    Pairs(Vec<ExportItem>),
    /// A raw quiz result; choices are derived per record.
    Quiz(QuizResult),
}

impl ExportInput {
    pub fn into_items(self) -> Vec<ExportItem> {
        match self {
            ExportInput::Pairs(items) => items,
            ExportInput::Quiz(result) => result
                .all
                .into_iter()
                .enumerate()
                .map(|(i, record)| ExportItem::from_record(i, record))
                .collect(),
        }
    }
}

pub fn chunk(config: &Config, file: &Path, max_chars: Option<usize>, save: bool) -> Result<ChunkResponse> {
    let mut chunk_config = ChunkConfig::from(&config.chunking);
    if let Some(max) = max_chars {
        chunk_config.max_chunk_chars = max;
    }

    let chunks = ingest_file(file, &chunk_config)
        .with_context(|| format!("failed to chunk {}", file.display()))?;
    let response = ChunkResponse {
        text: chunks.into_iter().map(|c| c.content).collect(),
    };

    if save {
        let path = store::save_json(&config.storage.response_dir, "chunks.json", &response)
            .context("failed to save chunks")?;
        info!(path = %path.display(), chunks = response.text.len(), "saved chunks");
    }
    Ok(response)
}

pub fn export(config: &Config, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let parsed: ExportInput = store::load_json(input)
        .with_context(|| format!("failed to read quiz from {}", input.display()))?;
    let items = parsed.into_items();

    let rendered = PageRenderer::new(&config.export)
        .render(&items)
        .context("failed to render quiz")?;

    let path = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &rendered.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            path.to_path_buf()
        }
        None => store::save_bytes(&config.storage.response_dir, "export.pdf", &rendered.bytes)
            .context("failed to save export")?,
    };

    info!(
        path = %path.display(),
        question_pages = rendered.question_pages,
        answer_key_pages = rendered.answer_key_pages,
        "exported quiz"
    );
    Ok(path)
}

fn merge_results<T: DeserializeOwned>(inputs: &[PathBuf]) -> Result<GenerationResult<T>> {
    let parts = inputs
        .iter()
        .map(|path| {
            store::load_json::<GenerationResult<T>>(path)
                .with_context(|| format!("failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(GenerationResult::concat(parts))
}

/// Merge result files and save the combined result. Returns the written path
/// and the record count.
pub fn merge(config: &Config, kind: MergeKind, inputs: &[PathBuf]) -> Result<(PathBuf, usize)> {
    let dir = &config.storage.response_dir;
    let name = kind.artifact_name();
    let (path, count) = match kind {
        MergeKind::Quiz => {
            let merged: QuizResult = merge_results(inputs)?;
            (store::save_json(dir, name, &merged)?, merged.len())
        }
        MergeKind::Flashcards => {
            let merged: quizgen_core::FlashcardResult = merge_results(inputs)?;
            (store::save_json(dir, name, &merged)?, merged.len())
        }
    };
    info!(path = %path.display(), records = count, files = inputs.len(), "merged results");
    Ok((path, count))
}
