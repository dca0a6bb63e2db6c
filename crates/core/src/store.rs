//! Local persistence for generated results and exported documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::QuizError;

/// Artifact names are plain file names inside the response directory.
fn artifact_path(dir: &Path, name: &str) -> Result<PathBuf, QuizError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);
    if !valid {
        return Err(QuizError::InvalidName(name.to_string()));
    }
    Ok(dir.join(name))
}

/// Write `value` as pretty-printed JSON to `dir/name`, creating `dir`.
pub fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, QuizError> {
    let path = artifact_path(dir, name)?;
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "saved json artifact");
    Ok(path)
}

/// Read a JSON artifact from an arbitrary path.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, QuizError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write raw bytes (e.g. a rendered PDF) to `dir/name`, creating `dir`.
pub fn save_bytes(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, QuizError> {
    let path = artifact_path(dir, name)?;
    fs::create_dir_all(dir)?;
    fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved binary artifact");
    Ok(path)
}
