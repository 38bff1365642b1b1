//! Single-file search engine.
//!
//! Picks between sync (whole file in memory) and streaming (bounded sliding
//! window) processing by file size, producing a bounded match list plus a
//! truncation flag. Errors here abort only this file's search; the directory
//! aggregator converts them into per-file skips.

use crate::context::surrounding_lines;
use crate::error::{Result, TrawlError};
use crate::matcher::LineMatcher;
use crate::options::{NormalizedOptions, SearchOptions};
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One matching line. Immutable once produced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Match {
    /// 1-based line number.
    pub line_number: usize,
    /// The matching line, trimmed.
    pub content: String,
    /// 0-based byte offset of the first hit on the raw (untrimmed) line.
    pub match_offset: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub before_context: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub after_context: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSearchResult {
    pub path: PathBuf,
    pub file_size_bytes: u64,
    pub matches: Vec<Match>,
    pub match_count: usize,
    pub truncated: bool,
    /// Full line count; sync mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<usize>,
    /// Lines consumed, including past the result cap; streaming mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines_processed: Option<usize>,
}

/// Search one file for `pattern`. The path must exist and be a regular
/// file; either gate failing is an error before any read happens.
pub fn search_file(path: &Path, pattern: &str, options: &SearchOptions) -> Result<FileSearchResult> {
    let opts = options.normalize();
    let matcher = LineMatcher::new(pattern, &opts)?;
    search_file_with(path, &matcher, &opts)
}

/// Engine entry point for callers that already compiled a matcher (the
/// directory aggregator compiles one per scan, not one per file).
pub(crate) fn search_file_with(
    path: &Path,
    matcher: &LineMatcher,
    opts: &NormalizedOptions,
) -> Result<FileSearchResult> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TrawlError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(TrawlError::Io(e)),
    };
    if metadata.is_dir() {
        return Err(TrawlError::IsADirectory(path.to_path_buf()));
    }

    let file_size = metadata.len();
    if file_size > opts.stream_threshold_bytes {
        debug!(
            "searching {} ({file_size} bytes) in streaming mode",
            path.display()
        );
        search_streaming(path, file_size, matcher, opts)
    } else {
        debug!(
            "searching {} ({file_size} bytes) in sync mode",
            path.display()
        );
        search_sync(path, file_size, matcher, opts)
    }
}

/// Whole-file-in-memory scan. Context comes from the full line array, where
/// random access is cheap.
fn search_sync(
    path: &Path,
    file_size: u64,
    matcher: &LineMatcher,
    opts: &NormalizedOptions,
) -> Result<FileSearchResult> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.lines().collect();

    let mut matches = Vec::new();
    let mut truncated = false;
    for (index, line) in lines.iter().enumerate() {
        if let Some(offset) = matcher.find(line) {
            if matches.len() < opts.max_results {
                let ctx = surrounding_lines(&lines, index, opts.context_lines);
                matches.push(Match {
                    line_number: index + 1,
                    content: line.trim().to_string(),
                    match_offset: Some(offset),
                    before_context: ctx.before,
                    after_context: ctx.after,
                });
            } else {
                // One further match is enough to prove truncation; the
                // total line count is already known from the split.
                truncated = true;
                break;
            }
        }
    }

    let match_count = matches.len();
    Ok(FileSearchResult {
        path: path.to_path_buf(),
        file_size_bytes: file_size,
        matches,
        match_count,
        truncated,
        total_lines: Some(lines.len()),
        total_lines_processed: None,
    })
}

/// Line-at-a-time scan holding at most `context_lines * 2 + 1` lines.
///
/// A line is examined once it reaches the center of a full window (or during
/// the end-of-input drain), so mid-file context is symmetric and boundary
/// context is clipped exactly like sync mode.
fn search_streaming(
    path: &Path,
    file_size: u64,
    matcher: &LineMatcher,
    opts: &NormalizedOptions,
) -> Result<FileSearchResult> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let window_cap = opts.context_lines * 2 + 1;
    let mut window: VecDeque<(usize, String)> = VecDeque::with_capacity(window_cap + 1);
    let mut matches: Vec<Match> = Vec::new();
    let mut truncated = false;
    let mut total_lines = 0usize;
    let mut next_to_examine = 1usize;

    for line in reader.lines() {
        let line = line.map_err(|e| TrawlError::Stream {
            path: path.to_path_buf(),
            source: e,
        })?;
        total_lines += 1;

        window.push_back((total_lines, line));
        if window.len() > window_cap {
            window.pop_front();
        }
        if window.len() < window_cap || truncated {
            // Still filling the window, or already known-truncated; keep
            // consuming only to count lines.
            continue;
        }

        let center_line = window[opts.context_lines].0;
        while next_to_examine <= center_line && !truncated {
            let index = next_to_examine - window[0].0;
            examine_window_line(&window, index, matcher, opts, &mut matches, &mut truncated);
            next_to_examine += 1;
        }
    }

    // Drain lines past the last full-window center (or the whole file, if it
    // was shorter than the window).
    while next_to_examine <= total_lines && !truncated {
        let index = next_to_examine - window[0].0;
        examine_window_line(&window, index, matcher, opts, &mut matches, &mut truncated);
        next_to_examine += 1;
    }

    let match_count = matches.len();
    Ok(FileSearchResult {
        path: path.to_path_buf(),
        file_size_bytes: file_size,
        matches,
        match_count,
        truncated,
        total_lines: None,
        total_lines_processed: Some(total_lines),
    })
}

fn examine_window_line(
    window: &VecDeque<(usize, String)>,
    index: usize,
    matcher: &LineMatcher,
    opts: &NormalizedOptions,
    matches: &mut Vec<Match>,
    truncated: &mut bool,
) {
    let (line_number, raw) = &window[index];
    if let Some(offset) = matcher.find(raw) {
        if matches.len() < opts.max_results {
            let buffered: Vec<&str> = window.iter().map(|(_, l)| l.as_str()).collect();
            let ctx = surrounding_lines(&buffered, index, opts.context_lines);
            matches.push(Match {
                line_number: *line_number,
                content: raw.trim().to_string(),
                match_offset: Some(offset),
                before_context: ctx.before,
                after_context: ctx.after,
            });
        } else {
            *truncated = true;
        }
    }
}
