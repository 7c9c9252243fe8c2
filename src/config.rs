//!
//! This module defines configuration structures and loading logic for blogcheck.
//! Configuration lives in `.blogcheck.toml`; command-line flags are applied on top
//! of whatever the file provides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = ".blogcheck.toml";

/// Directory holding the posts of a Hexo blog
pub const DEFAULT_ROOT: &str = "source/_posts";

pub const DEFAULT_CATEGORY_PATTERN: &str = r"^[a-z0-9]+$";
pub const DEFAULT_TAG_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Represents the complete configuration loaded from .blogcheck.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Global configuration options
    pub global: GlobalConfig,

    /// Front matter (categories and tags) checks
    pub front_matter: FrontMatterConfig,
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Directory scanned when no paths are given on the command line
    pub root: PathBuf,

    /// Accept indented code fences as long as they are indented consistently
    #[serde(alias = "allow_code_indent")]
    pub allow_code_indent: bool,

    /// Glob patterns of files to skip
    pub exclude: Vec<String>,

    /// Respect .gitignore files when scanning directories
    #[serde(alias = "respect_gitignore")]
    pub respect_gitignore: bool,

    /// Number of findings printed in full before output switches to per-file counts
    #[serde(alias = "max_shown_errors")]
    pub max_shown_errors: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            allow_code_indent: false,
            exclude: Vec::new(),
            respect_gitignore: true,
            max_shown_errors: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrontMatterConfig {
    pub enabled: bool,

    /// Pattern every category and every post directory name must match
    #[serde(alias = "category_pattern")]
    pub category_pattern: String,

    /// Pattern every tag must match
    #[serde(alias = "tag_pattern")]
    pub tag_pattern: String,
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            category_pattern: DEFAULT_CATEGORY_PATTERN.to_string(),
            tag_pattern: DEFAULT_TAG_PATTERN.to_string(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError { source: toml::de::Error, path: String },

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ParseError {
            source,
            path: path.to_string(),
        })
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `.blogcheck.toml` in the current
    /// directory is used when present, and defaults otherwise. `no_config` skips
    /// auto-discovery.
    pub fn load(config_path: Option<&str>, no_config: bool) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_file(Path::new(path));
        }

        if no_config {
            log::debug!("[blogcheck-config] Skipping auto-discovery due to --no-config flag");
            return Ok(Self::default());
        }

        let candidate = Path::new(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("[blogcheck-config] Found config file: {}", candidate.display());
            Self::load_file(candidate)
        } else {
            log::debug!("[blogcheck-config] No config file found, using defaults");
            Ok(Self::default())
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: display.clone(),
        })?;
        let config = Self::from_toml_str(&content, &display)?;
        log::debug!("[blogcheck-config] Loaded {display}: {config:?}");
        Ok(config)
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    let default_config = format!(
        r#"# blogcheck configuration file

[global]
# Directory scanned when no paths are given
root = "{DEFAULT_ROOT}"

# Accept indented code fences (open and close must still match)
allow-code-indent = false

# Glob patterns of files to skip
# exclude = ["drafts/**"]

# Respect .gitignore files when scanning directories
respect-gitignore = true

# Findings printed in full before switching to per-file counts
max-shown-errors = 10

[front-matter]
enabled = true
category-pattern = '{DEFAULT_CATEGORY_PATTERN}'
tag-pattern = '{DEFAULT_TAG_PATTERN}'
"#
    );

    fs::write(path, default_config).map_err(|source| ConfigError::IoError {
        source,
        path: path.to_string(),
    })
}
