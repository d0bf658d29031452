//! Configuration management for reindent.
//!
//! This module provides the [`Config`] struct which controls reconstruction
//! and file handling. Configuration can be loaded from:
//! - TOML files (`reindent.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::format::{IndentOptions, DEFAULT_ANSWER_MARKERS, DEFAULT_INDENT_WIDTH};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["reindent.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}
fn default_answer_markers() -> Vec<String> {
    DEFAULT_ANSWER_MARKERS
        .iter()
        .map(|m| (*m).to_string())
        .collect()
}
fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

/// Main configuration struct for reindent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Spaces per indentation unit (default: 4)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Line prefixes that end top-level code after a `print(` call
    /// (default: `A)`, `B)`, `C)`, `D)`)
    #[serde(default = "default_answer_markers")]
    pub answer_markers: Vec<String>,

    /// Only touch text the code detector fires on (default: false)
    #[serde(default)]
    pub only_detected: bool,

    /// File extensions picked up when walking directories (default: txt, md)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent_width: Option<usize>,
    pub answer_markers: Option<Vec<String>>,
    pub only_detected: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent_width: DEFAULT_INDENT_WIDTH,
            answer_markers: default_answer_markers(),
            only_detected: false,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent width
    const MAX_INDENT_WIDTH: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent_width == 0 {
            return Some("indent_width must be at least 1".to_string());
        }
        if self.indent_width > Self::MAX_INDENT_WIDTH {
            return Some(format!(
                "indent_width {} exceeds maximum of {}",
                self.indent_width,
                Self::MAX_INDENT_WIDTH
            ));
        }
        if let Some(pos) = self.answer_markers.iter().position(|m| m.trim().is_empty()) {
            return Some(format!("answer_markers[{pos}] must not be empty"));
        }
        None
    }

    /// Options handed to the reconstructor
    #[must_use]
    pub fn indent_options(&self) -> IndentOptions {
        IndentOptions {
            indent_width: self.indent_width,
            answer_markers: self.answer_markers.clone(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent_width {
            self.indent_width = v;
        }
        if let Some(v) = &partial.answer_markers {
            self.answer_markers.clone_from(v);
        }
        if let Some(v) = partial.only_detected {
            self.only_detected = v;
        }
        if let Some(v) = &partial.extensions {
            self.extensions.clone_from(v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer configs are applied last
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        let mut config = Self::default();
        for path in &config_files {
            debug!("Applying config file {}", path.display());
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
