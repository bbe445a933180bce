//! Tool configuration
//!
//! Configuration is stored in `.landscape/landscape.toml` (per landscape) and
//! `~/.config/landscape/config.toml` (global). Both are optional.
//!
//! This is separate from the landscape's own organization settings in
//! `.landscape/config.yaml`, which are landscape data.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::landscape::{CONFIG_DIR, TOOL_CONFIG_FILE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Optional validation passes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Warn about references from data entities, integrations, domains and
    /// change-request capabilities that do not resolve
    pub extended_references: bool,

    /// Warn about capability parent/child lists that disagree or loop
    pub capability_hierarchy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Output path, relative to the landscape root
    pub output: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("landscape-data.json"),
        }
    }
}

/// Landscape-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub validation: ValidationConfig,
    pub bundle: BundleConfig,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Combined configuration (global + landscape)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub landscape_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific landscape
    pub fn for_landscape(root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(root)?;

        Ok(Self {
            project,
            global,
            landscape_root: Some(root.to_path_buf()),
        })
    }

    /// Loads only the global configuration
    pub fn global_only() -> Result<Self> {
        Ok(Self {
            project: ProjectConfig::default(),
            global: Self::load_global()?,
            landscape_root: None,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "landscape", "landscape-cli")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project_config(root: &Path) -> Result<ProjectConfig> {
        let config_path = root.join(CONFIG_DIR).join(TOOL_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read landscape config: {}", config_path.display())
        })?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse landscape config")?;

        if config.bundle.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("bundle.output must not be empty".into()).into());
        }

        Ok(config)
    }

    /// Finds the landscape root by looking for a `.landscape/` directory
    pub fn find_landscape_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_landscape_root_from(&current)
    }

    /// Walks up from `start` to the first directory containing `.landscape/`
    pub fn find_landscape_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Saves the landscape configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self
            .landscape_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No landscape root for this configuration"))?;
        let config_path = root.join(CONFIG_DIR).join(TOOL_CONFIG_FILE);

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize landscape config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write landscape config: {}", config_path.display()))
    }
}
