//! Configuration management for PyMath
//!
//! The only value the app ever writes back is the theme flag; everything
//! else is read at startup and left as the user wrote it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;
use crate::tutor::ClaudeModel;

/// Default number of lesson characters sent to the tutor
pub const DEFAULT_CONTEXT_CHARS: usize = 3000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted light/dark choice; detected from the terminal when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,

    /// Model used by the tutor
    pub model: ClaudeModel,

    /// Characters of lesson text sent along with each question
    pub context_chars: usize,

    /// Directory whose `<topic-id>.md` files take precedence over the built-in lessons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_dir: Option<PathBuf>,

    /// Vim mode enabled
    pub vim_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            model: ClaudeModel::default(),
            context_chars: DEFAULT_CONTEXT_CHARS,
            lessons_dir: None,
            vim_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from the platform config dir, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Save configuration to the platform config dir
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("pymath.log"))
    }

    /// Effective theme mode
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.unwrap_or_else(ThemeMode::detect)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "pymath").context("Failed to determine config directory")
}
