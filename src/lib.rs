//! Bounded, failure-tolerant text search across files and directory trees.
//!
//! Single-file searches pick between whole-file (sync) and sliding-window
//! (streaming) processing by size; directory searches walk candidates
//! lazily and degrade per file instead of aborting the scan.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod matcher;
pub mod options;
pub mod output_formats;
pub mod processor;
pub mod walker;

pub use aggregator::{search_directory, search_project, DirectorySearchResult, FILE_SCAN_CEILING};
pub use context::{surrounding_lines, LineContext};
pub use error::{Result, TrawlError};
pub use matcher::LineMatcher;
pub use options::{NormalizedOptions, SearchOptions};
pub use processor::{search_file, FileSearchResult, Match};
pub use walker::{walk_candidates, DEFAULT_TEXT_EXTENSIONS};
