use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrawlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("path is a directory, not a file: {0}")]
    IsADirectory(PathBuf),

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("stream processing failed for '{path}': {source}")]
    Stream {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrawlError>;
