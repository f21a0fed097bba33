//! Configuration parsing and management.

use crate::markdown::TableHeaderMode;
use bookwiki_types::ChapterSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main configuration struct matching the bookwiki.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    /// Chapter directories in display order
    pub chapters: Vec<ChapterSpec>,

    #[serde(default)]
    pub table_headers: TableHeaderMode,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_chapters_dir")]
    pub chapters: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,

    /// Optional markdown file rendered as the index body
    #[serde(default)]
    pub index: Option<PathBuf>,
}

fn default_chapters_dir() -> PathBuf {
    PathBuf::from("chapters")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("html")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            chapters: default_chapters_dir(),
            output: default_output_dir(),
            index: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Invalid("site.title must not be empty".into()));
        }
        if self.chapters.is_empty() {
            return Err(ConfigError::Invalid("at least one chapter is required".into()));
        }

        let mut seen = HashSet::new();
        for chapter in &self.chapters {
            if chapter.id.trim().is_empty() {
                return Err(ConfigError::Invalid("chapter id must not be empty".into()));
            }
            if !seen.insert(chapter.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate chapter id '{}'",
                    chapter.id
                )));
            }
        }

        Ok(())
    }

    /// Get the chapters directory, resolved relative to config file
    pub fn chapters_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.chapters)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the optional index markdown file, resolved relative to config file
    pub fn index_file(&self) -> Option<PathBuf> {
        self.paths.index.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
