//! Directory-wide search: drives the walker, runs the single-file engine per
//! candidate, and merges results under global ceilings.
//!
//! A file that cannot be searched becomes one diagnostic string in
//! `skipped_files`; only a malformed root aborts the operation.

use crate::error::{Result, TrawlError};
use crate::matcher::LineMatcher;
use crate::options::{NormalizedOptions, SearchOptions};
use crate::processor::{search_file_with, FileSearchResult};
use crate::walker::walk_candidates;
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Hard ceiling on files examined in one scan.
pub const FILE_SCAN_CEILING: usize = 1000;

/// Minimum per-file sub-budget, whatever the global budget.
const SUB_BUDGET_FLOOR: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct DirectorySearchResult {
    pub pattern: String,
    pub total_matches: usize,
    pub files_with_matches: usize,
    pub files_searched: usize,
    pub total_files_encountered: usize,
    pub results: Vec<FileSearchResult>,
    pub truncated: bool,
    pub skipped_files: Vec<String>,
}

/// Search every candidate file under `root`. Fails fast on a missing or
/// non-directory root and on an invalid pattern; per-file problems are
/// recorded and skipped.
pub fn search_directory(
    root: &Path,
    pattern: &str,
    options: &SearchOptions,
) -> Result<DirectorySearchResult> {
    scan(root, pattern, options.normalize())
}

/// Project-grep preset: the same scan with `logs` added to the exclude set.
pub fn search_project(
    root: &Path,
    pattern: &str,
    options: &SearchOptions,
) -> Result<DirectorySearchResult> {
    let mut opts = options.normalize();
    if !opts.exclude_patterns.iter().any(|p| p == "logs") {
        opts.exclude_patterns.push("logs".to_string());
    }
    scan(root, pattern, opts)
}

fn scan(root: &Path, pattern: &str, opts: NormalizedOptions) -> Result<DirectorySearchResult> {
    match fs::metadata(root) {
        Ok(meta) if !meta.is_dir() => {
            return Err(TrawlError::NotADirectory(root.to_path_buf()));
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TrawlError::DirectoryNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(TrawlError::Io(e)),
    }

    // Compile once for the whole scan; a bad pattern surfaces here, before
    // any file is touched.
    let matcher = LineMatcher::new(pattern, &opts)?;

    // A single match-dense file must not exhaust the global budget.
    let sub_budget = (opts.max_results / 10).max(SUB_BUDGET_FLOOR);
    let mut per_file = opts.clone();
    per_file.max_results = sub_budget;

    debug!(
        "scanning {} for '{pattern}' (sub-budget {sub_budget}, global cap {})",
        root.display(),
        opts.max_results
    );

    let mut results: Vec<FileSearchResult> = Vec::new();
    let mut skipped_files: Vec<String> = Vec::new();
    let mut total_matches = 0usize;
    let mut files_with_matches = 0usize;
    let mut files_searched = 0usize;
    let mut total_files_encountered = 0usize;
    let mut truncated = false;

    for path in walk_candidates(root, &opts) {
        total_files_encountered += 1;
        files_searched += 1;

        let relative = path
            .strip_prefix(root)
            .unwrap_or(path.as_path())
            .to_path_buf();

        match search_file_with(&path, &matcher, &per_file) {
            Ok(mut file_result) => {
                if file_result.match_count > 0 {
                    total_matches += file_result.match_count;
                    files_with_matches += 1;
                    truncated |= file_result.truncated;

                    file_result.path = relative;
                    file_result.total_lines = None;
                    file_result.total_lines_processed = None;
                    results.push(file_result);
                }
            }
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                skipped_files.push(format!("{}: {e}", relative.display()));
            }
        }

        if files_searched >= FILE_SCAN_CEILING || total_matches >= opts.max_results {
            truncated = true;
            break;
        }
    }

    debug!(
        "scan of {} done: {total_matches} matches in {files_with_matches}/{files_searched} files, \
         {} skipped",
        root.display(),
        skipped_files.len()
    );

    Ok(DirectorySearchResult {
        pattern: pattern.to_string(),
        total_matches,
        files_with_matches,
        files_searched,
        total_files_encountered,
        results,
        truncated,
        skipped_files,
    })
}
