use crate::options::SearchOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchDefaults,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub use_regex: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub context_lines: Option<usize>,
    pub max_results: Option<usize>,
    pub default_extensions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Substring patterns; empty means the built-in exclude set applies.
    pub patterns: Vec<String>,
    pub hidden_files: bool,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            patterns: vec![],
            hidden_files: true,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_file_size_mb: Option<u64>,
    pub stream_threshold_mb: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_path()?;
        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&content).with_context(|| "Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    fn find_config_path() -> Result<Option<PathBuf>> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("trawl/config.toml");
            if xdg_path.exists() {
                return Ok(Some(xdg_path));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".trawl.toml");
            if home_path.exists() {
                return Ok(Some(home_path));
            }
        }

        let current_path = Path::new(".trawl.toml");
        if current_path.exists() {
            return Ok(Some(current_path.to_path_buf()));
        }

        Ok(None)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Translate the file-based defaults into a partial [`SearchOptions`],
    /// ready for CLI flags to override field by field.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            use_regex: self.search.use_regex,
            case_sensitive: self.search.case_sensitive,
            regex_flags: None,
            max_results: self.search.max_results,
            context_lines: self.search.context_lines,
            file_types: if self.search.default_extensions.is_empty() {
                None
            } else {
                Some(self.search.default_extensions.clone())
            },
            recursive: None,
            exclude_patterns: if self.ignore.patterns.is_empty() {
                None
            } else {
                Some(self.ignore.patterns.clone())
            },
            include_hidden: if self.ignore.hidden_files {
                None
            } else {
                Some(true)
            },
            max_file_size_bytes: self.limits.max_file_size_mb.map(|mb| mb * 1024 * 1024),
            stream_threshold_bytes: self.limits.stream_threshold_mb.map(|mb| mb * 1024 * 1024),
        }
    }
}
