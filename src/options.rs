//! Caller-supplied partial search options and their normalized form.
//!
//! `SearchOptions` is what callers (CLI flags, config file, library users)
//! hand in: every field optional. `normalize` is the single authority that
//! turns it into a `NormalizedOptions` with every field concrete, so the
//! rest of the engine never checks for defaults.

use serde::Deserialize;

pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const MAX_RESULTS_CEILING: usize = 10_000;
pub const MAX_CONTEXT_LINES: usize = 10;
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_STREAM_THRESHOLD_BYTES: u64 = 50 * 1024 * 1024;

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
    &["node_modules", "dist", ".git", ".next", "build", "coverage"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub use_regex: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub regex_flags: Option<String>,
    pub max_results: Option<usize>,
    pub context_lines: Option<usize>,
    pub file_types: Option<Vec<String>>,
    pub recursive: Option<bool>,
    pub exclude_patterns: Option<Vec<String>>,
    pub include_hidden: Option<bool>,
    pub max_file_size_bytes: Option<u64>,
    pub stream_threshold_bytes: Option<u64>,
}

/// Fully resolved options. Produced by [`SearchOptions::normalize`]; nothing
/// downstream ever sees an absent field.
#[derive(Debug, Clone)]
pub struct NormalizedOptions {
    pub use_regex: bool,
    pub case_sensitive: bool,
    pub regex_flags: String,
    pub max_results: usize,
    pub context_lines: usize,
    pub file_types: Vec<String>,
    pub recursive: bool,
    pub exclude_patterns: Vec<String>,
    pub include_hidden: bool,
    pub max_file_size_bytes: u64,
    pub stream_threshold_bytes: u64,
}

impl SearchOptions {
    /// Fill defaults and clamp numeric bounds. Pure; no failure mode.
    /// Out-of-range values are clamped, never rejected; hard validation is
    /// the caller's job.
    pub fn normalize(&self) -> NormalizedOptions {
        let case_sensitive = self.case_sensitive.unwrap_or(false);
        // Explicit flags win; otherwise case sensitivity decides whether the
        // default "i" applies.
        let regex_flags = match &self.regex_flags {
            Some(flags) => flags.clone(),
            None if case_sensitive => String::new(),
            None => "i".to_string(),
        };

        NormalizedOptions {
            use_regex: self.use_regex.unwrap_or(false),
            case_sensitive,
            regex_flags,
            max_results: self
                .max_results
                .unwrap_or(DEFAULT_MAX_RESULTS)
                .clamp(1, MAX_RESULTS_CEILING),
            context_lines: self
                .context_lines
                .unwrap_or(0)
                .min(MAX_CONTEXT_LINES),
            file_types: self
                .file_types
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            recursive: self.recursive.unwrap_or(true),
            exclude_patterns: self.exclude_patterns.clone().unwrap_or_else(|| {
                DEFAULT_EXCLUDE_PATTERNS
                    .iter()
                    .map(|p| p.to_string())
                    .collect()
            }),
            include_hidden: self.include_hidden.unwrap_or(false),
            max_file_size_bytes: self
                .max_file_size_bytes
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES),
            stream_threshold_bytes: self
                .stream_threshold_bytes
                .unwrap_or(DEFAULT_STREAM_THRESHOLD_BYTES),
        }
    }
}

/// Extensions are stored with a leading dot, lowercased, so lookups are
/// insensitive to how the caller spelled them ("rs", ".rs", ".RS").
fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}
