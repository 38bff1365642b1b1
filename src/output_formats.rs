//! Renderings of search results for the CLI surface.

use crate::aggregator::DirectorySearchResult;
use crate::processor::{FileSearchResult, Match};
use byte_unit::{Byte, UnitType};
use clap::ValueEnum;
use colored::*;
use serde_json::json;
use std::fmt;

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

pub fn render_file_result(format: &OutputFormat, result: &FileSearchResult, pattern: &str) -> String {
    match format {
        OutputFormat::Text => file_text(result, pattern),
        OutputFormat::Json => {
            let value = json!({
                "pattern": pattern,
                "result": result,
            });
            serde_json::to_string_pretty(&value).unwrap()
        }
        OutputFormat::Markdown => file_markdown(result, pattern),
    }
}

pub fn render_directory_result(format: &OutputFormat, result: &DirectorySearchResult) -> String {
    match format {
        OutputFormat::Text => directory_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap(),
        OutputFormat::Markdown => directory_markdown(result),
    }
}

fn human_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{:.2} {}", adjusted.get_value(), adjusted.get_unit())
}

fn push_match_text(output: &mut String, m: &Match) {
    for line in &m.before_context {
        output.push_str(&format!("    │ {}\n", line.dimmed()));
    }
    output.push_str(&format!(
        "→ {} │ {}\n",
        m.line_number.to_string().yellow().bold(),
        m.content
    ));
    for line in &m.after_context {
        output.push_str(&format!("    │ {}\n", line.dimmed()));
    }
}

fn file_text(result: &FileSearchResult, pattern: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} {} ({})\n",
        "File".green().bold(),
        result.path.display(),
        human_size(result.file_size_bytes)
    ));
    let truncated = if result.truncated { " (truncated)" } else { "" };
    output.push_str(&format!(
        "{} {} match(es) for '{pattern}'{truncated}\n",
        "Found".green(),
        result.match_count
    ));

    for m in &result.matches {
        output.push_str(&"-".repeat(60).dimmed().to_string());
        output.push('\n');
        push_match_text(&mut output, m);
    }
    output
}

fn directory_text(result: &DirectorySearchResult) -> String {
    let mut output = String::new();
    let truncated = if result.truncated { " (truncated)" } else { "" };
    output.push_str(&format!(
        "{} {} match(es) for '{}' in {} of {} file(s) searched{truncated}\n",
        "Found".green().bold(),
        result.total_matches,
        result.pattern,
        result.files_with_matches,
        result.files_searched,
    ));

    for file in &result.results {
        output.push_str(&format!(
            "\n{} {} — {} match(es)\n",
            "File".green(),
            file.path.display(),
            file.match_count
        ));
        for m in &file.matches {
            push_match_text(&mut output, m);
        }
    }

    if !result.skipped_files.is_empty() {
        output.push_str(&format!("\n{}\n", "Skipped:".yellow().bold()));
        for skipped in &result.skipped_files {
            output.push_str(&format!("  {}\n", skipped.yellow()));
        }
    }
    output
}

fn file_markdown(result: &FileSearchResult, pattern: &str) -> String {
    let mut output = String::new();
    output.push_str("# Search Results\n\n");
    output.push_str(&format!("**Pattern:** `{pattern}`\n"));
    output.push_str(&format!("**Path:** `{}`\n", result.path.display()));
    output.push_str(&format!("**Matches:** {}", result.match_count));
    if result.truncated {
        output.push_str(" (truncated)");
    }
    output.push_str("\n\n");

    for m in &result.matches {
        output.push_str("```\n");
        for line in &m.before_context {
            output.push_str(&format!("    │ {line}\n"));
        }
        output.push_str(&format!("→ {:>4} │ {}\n", m.line_number, m.content));
        for line in &m.after_context {
            output.push_str(&format!("    │ {line}\n"));
        }
        output.push_str("```\n\n");
    }
    output
}

fn directory_markdown(result: &DirectorySearchResult) -> String {
    let mut output = String::new();
    output.push_str("# Search Results\n\n");
    output.push_str(&format!("**Pattern:** `{}`\n", result.pattern));
    output.push_str(&format!(
        "**Total matches:** {} across {} file(s)",
        result.total_matches, result.files_with_matches
    ));
    if result.truncated {
        output.push_str(" (truncated)");
    }
    output.push_str("\n\n");

    for file in &result.results {
        output.push_str(&format!(
            "## {} ({} match(es))\n\n```\n",
            file.path.display(),
            file.match_count
        ));
        for m in &file.matches {
            output.push_str(&format!("→ {:>4} │ {}\n", m.line_number, m.content));
        }
        output.push_str("```\n\n");
    }

    if !result.skipped_files.is_empty() {
        output.push_str("## Skipped\n\n");
        for skipped in &result.skipped_files {
            output.push_str(&format!("- {skipped}\n"));
        }
    }
    output
}
