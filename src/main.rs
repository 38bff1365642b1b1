use clap::{CommandFactory, Parser};
use env_logger::{Builder, Env, Target};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::time::Instant;
use trawl::cli::{Cli, Commands, DirFlags, SearchFlags};
use trawl::config::Config;
use trawl::output_formats::{render_directory_result, render_file_result};
use trawl::{search_directory, search_file, search_project, Result, SearchOptions, TrawlError};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    let config = load_config();

    match &cli.command {
        Commands::File {
            path,
            pattern,
            search,
            output_format,
        } => {
            let options = build_options(search, None, &config);
            let result = search_file(path, pattern, &options)?;
            println!("{}", render_file_result(output_format, &result, pattern));
        }

        Commands::Dir {
            path,
            pattern,
            search,
            dir,
            output_format,
        } => {
            let options = build_options(search, Some(dir), &config);
            let pb = scan_spinner();
            pb.set_message(format!("Scanning {}...", path.display()));
            let outcome = search_directory(path, pattern, &options);
            pb.finish_and_clear();
            println!("{}", render_directory_result(output_format, &outcome?));
        }

        Commands::Project {
            pattern,
            root,
            search,
            dir,
            output_format,
        } => {
            let root = match root {
                Some(r) => r.clone(),
                None => std::env::current_dir().map_err(TrawlError::Io)?,
            };
            let options = build_options(search, Some(dir), &config);
            let pb = scan_spinner();
            pb.set_message(format!("Scanning project at {}...", root.display()));
            let outcome = search_project(&root, pattern, &options);
            pb.finish_and_clear();
            println!("{}", render_directory_result(output_format, &outcome?));
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "trawl", &mut std::io::stdout());
        }
    }

    info!(
        "Finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to default config: {e}");
            Config::default()
        }
    }
}

fn scan_spinner() -> ProgressBar {
    ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    )
}

/// CLI flags override config-file defaults field by field; anything neither
/// supplies is left for the normalizer.
fn build_options(search: &SearchFlags, dir: Option<&DirFlags>, config: &Config) -> SearchOptions {
    let base = config.search_options();
    SearchOptions {
        use_regex: if search.regex { Some(true) } else { base.use_regex },
        case_sensitive: if search.case_sensitive {
            Some(true)
        } else {
            base.case_sensitive
        },
        regex_flags: search.regex_flags.clone().or(base.regex_flags),
        max_results: search.max_results.or(base.max_results),
        context_lines: search.context.or(base.context_lines),
        file_types: dir
            .and_then(|d| d.extensions.clone())
            .or(base.file_types),
        recursive: match dir {
            Some(d) if d.no_recursive => Some(false),
            _ => base.recursive,
        },
        exclude_patterns: dir.and_then(|d| d.exclude.clone()).or(base.exclude_patterns),
        include_hidden: match dir {
            Some(d) if d.show_hidden => Some(true),
            _ => base.include_hidden,
        },
        max_file_size_bytes: dir
            .and_then(|d| d.max_size)
            .map(|mb| mb * 1024 * 1024)
            .or(base.max_file_size_bytes),
        stream_threshold_bytes: base.stream_threshold_bytes,
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(TrawlError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(TrawlError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| TrawlError::Config(e.to_string()))?;
    Ok(())
}
