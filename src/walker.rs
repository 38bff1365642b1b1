//! Lazy, depth-first candidate enumeration.
//!
//! Best-effort: directory-read and stat failures drop the affected entry
//! and nothing else. Directory trees routinely contain permission-denied
//! and race-deleted entries, so this walker never raises.

use crate::options::NormalizedOptions;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions searched when the caller supplies no `file_types` of their
/// own. Extensionless files (Makefile, LICENSE, dotless scripts) also pass.
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    // plain text
    "txt", "md", "rst", "org", "log",
    // source code
    "rs", "py", "js", "ts", "jsx", "tsx", "mjs", "go", "java", "c", "h", "cpp", "hpp", "cc", "cs",
    "php", "rb", "swift", "kt", "scala", "lua", "sh", "bash", "zsh", "fish", "ps1", "bat",
    // web
    "html", "htm", "css", "scss", "less", "vue", "svelte",
    // configuration
    "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "xml", "svg", "env", "properties",
    "dockerfile", "makefile", "gradle", "lock",
    // data
    "csv", "tsv", "sql", "graphql", "proto",
];

/// Walk `root` depth-first, yielding candidate file paths that pass the
/// hidden-file, exclude-pattern, extension and size rules. Order-preserving
/// and lazy: pulling one item does at most one directory read ahead.
pub fn walk_candidates<'a>(
    root: &Path,
    opts: &'a NormalizedOptions,
) -> impl Iterator<Item = PathBuf> + 'a {
    let max_depth = if opts.recursive { usize::MAX } else { 1 };
    let cwd = std::env::current_dir().ok();

    WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(move |entry| {
            // Prune excluded directories wholesale; the root itself is not
            // an entry subject to filtering.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !opts.exclude_patterns.iter().any(|p| name.contains(p.as_str()))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();

            if !opts.include_hidden && name.starts_with('.') {
                return None;
            }

            let relative = cwd
                .as_deref()
                .and_then(|c| path.strip_prefix(c).ok())
                .unwrap_or(path)
                .to_string_lossy();
            if opts
                .exclude_patterns
                .iter()
                .any(|p| relative.contains(p.as_str()) || name.contains(p.as_str()))
            {
                return None;
            }

            if !extension_allowed(path, opts) {
                return None;
            }

            match entry.metadata() {
                Ok(meta) if meta.len() > opts.max_file_size_bytes => {
                    debug!(
                        "skipping oversized file ({} bytes): {}",
                        meta.len(),
                        path.display()
                    );
                    None
                }
                Ok(_) => Some(entry.into_path()),
                Err(e) => {
                    debug!("skipping unstatable entry {}: {e}", path.display());
                    None
                }
            }
        })
}

fn extension_allowed(path: &Path, opts: &NormalizedOptions) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    if !opts.file_types.is_empty() {
        // Normalized file_types carry a leading dot.
        return match ext {
            Some(ext) => opts.file_types.iter().any(|t| t == &format!(".{ext}")),
            None => false,
        };
    }

    match ext {
        Some(ext) => DEFAULT_TEXT_EXTENSIONS.contains(&ext.as_str()),
        None => true,
    }
}
