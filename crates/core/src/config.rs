use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_f32(profile: &str, key: &str, default: f32) -> f32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
    pub export: ExportConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `QUIZGEN_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("QUIZGEN_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingConfig::from_env_profiled(p),
            export: ExportConfig::from_env_profiled(p),
            storage: StorageConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  chunking:  max_chunk_chars={}", self.chunking.max_chunk_chars);
        tracing::info!(
            "  export:    questions_per_page={}, answers_per_page={}, font_size={}",
            self.export.questions_per_page,
            self.export.answers_per_page,
            self.export.font_size
        );
        tracing::info!(
            "  storage:   response_dir={}",
            self.storage.response_dir.display()
        );
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Soft upper bound on chunk length in characters. A chunk is flushed as
    /// soon as the accumulated text exceeds it.
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chunk_chars: 2000 }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_chunk_chars: profiled_env_usize(p, "CHUNK_MAX_CHARS", 2000),
        }
    }
}

// ── Export ────────────────────────────────────────────────────

pub const DEFAULT_TITLE: &str = "Created with AI Textbook Quiz Creator";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Records per page in the question section.
    pub questions_per_page: usize,
    /// Records per page in the answer-key section.
    pub answers_per_page: usize,
    /// Title line printed in every page header.
    pub title: String,
    /// Body font size in points.
    pub font_size: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            questions_per_page: 2,
            answers_per_page: 15,
            title: DEFAULT_TITLE.to_string(),
            font_size: 12.0,
        }
    }
}

impl ExportConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            questions_per_page: profiled_env_usize(p, "EXPORT_QUESTIONS_PER_PAGE", 2),
            answers_per_page: profiled_env_usize(p, "EXPORT_ANSWERS_PER_PAGE", 15),
            title: profiled_env_or(p, "EXPORT_TITLE", DEFAULT_TITLE),
            font_size: profiled_env_f32(p, "EXPORT_FONT_SIZE", 12.0),
        }
    }

    /// Copy with page-break intervals clamped to at least one record per page
    /// and a positive font size.
    pub fn validated(&self) -> Self {
        let font_size = if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            12.0
        };
        Self {
            questions_per_page: self.questions_per_page.max(1),
            answers_per_page: self.answers_per_page.max(1),
            title: self.title.clone(),
            font_size,
        }
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where generated JSON results and exported PDFs are written.
    pub response_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            response_dir: PathBuf::from("responses"),
        }
    }
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            response_dir: PathBuf::from(profiled_env_or(p, "RESPONSE_DIR", "responses")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_layout() {
        let config = Config::default();
        assert_eq!(config.chunking.max_chunk_chars, 2000);
        assert_eq!(config.export.questions_per_page, 2);
        assert_eq!(config.export.answers_per_page, 15);
        assert_eq!(config.export.title, DEFAULT_TITLE);
        assert_eq!(config.storage.response_dir, PathBuf::from("responses"));
        assert_eq!(config.profile_label(), "default");
    }

    #[test]
    fn storage_holds_only_the_response_dir() {
        let json = serde_json::to_value(StorageConfig::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "response_dir": "responses" }));
    }

    #[test]
    fn validated_clamps_zero_intervals() {
        let export = ExportConfig {
            questions_per_page: 0,
            answers_per_page: 0,
            title: "T".to_string(),
            font_size: -3.0,
        };
        let v = export.validated();
        assert_eq!(v.questions_per_page, 1);
        assert_eq!(v.answers_per_page, 1);
        assert_eq!(v.font_size, 12.0);
        assert_eq!(v.title, "T");
    }

    #[test]
    fn profiled_lookup_prefers_prefixed_key() {
        // Unique key names so parallel tests never observe each other.
        env::set_var("QZT_PROFILE_KEY_A", "base");
        env::set_var("QZTEST_QZT_PROFILE_KEY_A", "prefixed");
        assert_eq!(
            profiled_env_opt("QZTEST", "QZT_PROFILE_KEY_A").as_deref(),
            Some("prefixed")
        );
        assert_eq!(profiled_env_opt("", "QZT_PROFILE_KEY_A").as_deref(), Some("base"));
        assert_eq!(profiled_env_usize("QZTEST", "QZT_PROFILE_MISSING", 7), 7);
    }
}
