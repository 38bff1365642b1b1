use crate::output_formats::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a single file for a pattern
    File {
        path: PathBuf,
        pattern: String,

        #[clap(flatten)]
        search: SearchFlags,

        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Search every candidate file under a directory
    Dir {
        path: PathBuf,
        pattern: String,

        #[clap(flatten)]
        search: SearchFlags,

        #[clap(flatten)]
        dir: DirFlags,

        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Directory search preset rooted at the project directory
    Project {
        pattern: String,

        /// Project root; defaults to the current directory
        #[clap(long, value_parser)]
        root: Option<PathBuf>,

        #[clap(flatten)]
        search: SearchFlags,

        #[clap(flatten)]
        dir: DirFlags,

        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Generate shell completions
    Completions {
        #[clap(value_parser)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct SearchFlags {
    /// Treat the pattern as a regular expression
    #[clap(long, value_parser, default_value_t = false)]
    pub regex: bool,

    #[clap(long, value_parser, default_value_t = false)]
    pub case_sensitive: bool,

    /// Regex flag characters (i, m, s, x, U)
    #[clap(long, value_parser)]
    pub regex_flags: Option<String>,

    #[clap(long, value_parser)]
    pub max_results: Option<usize>,

    /// Context lines either side of a match (0-10)
    #[clap(short = 'C', long, value_parser)]
    pub context: Option<usize>,
}

#[derive(Args)]
pub struct DirFlags {
    /// Comma-separated extension filter, e.g. rs,toml
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub extensions: Option<Vec<String>>,

    /// Do not recurse into subdirectories
    #[clap(long, value_parser, default_value_t = false)]
    pub no_recursive: bool,

    /// Comma-separated substring exclude patterns
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub exclude: Option<Vec<String>>,

    #[clap(long, value_parser, default_value_t = false)]
    pub show_hidden: bool,

    /// Per-file size cap in megabytes
    #[clap(long, value_parser)]
    pub max_size: Option<u64>,
}
