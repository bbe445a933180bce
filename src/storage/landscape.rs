//! Landscape root handle
//!
//! Knows the on-disk layout, creates new landscapes and provides access
//! to the stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, LandscapeReader, SequenceStore};

pub const CONFIG_DIR: &str = ".landscape";
pub const LANDSCAPE_CONFIG_FILE: &str = "config.yaml";
pub const SEQUENCES_FILE: &str = "id-sequences.yaml";
pub const TOOL_CONFIG_FILE: &str = "landscape.toml";
pub const MODEL_DIR: &str = "model";
pub const CHANGES_DIR: &str = "changes";
pub const INDEX_FILE: &str = "_index.yaml";

#[derive(Debug, Error)]
pub enum LandscapeError {
    #[error("Landscape root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Not in a landscape. Run 'landscape init' or pass --landscape.")]
    NotALandscape,
}

/// Per-kind directories under `model/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelDir {
    Domains,
    Applications,
    Capabilities,
    DataEntities,
    Integrations,
}

impl ModelDir {
    pub fn dir_name(&self) -> &'static str {
        match self {
            ModelDir::Domains => "domains",
            ModelDir::Applications => "applications",
            ModelDir::Capabilities => "capabilities",
            ModelDir::DataEntities => "data-entities",
            ModelDir::Integrations => "integrations",
        }
    }

    /// Returns all model directories
    pub fn all() -> &'static [ModelDir] {
        &[
            ModelDir::Domains,
            ModelDir::Applications,
            ModelDir::Capabilities,
            ModelDir::DataEntities,
            ModelDir::Integrations,
        ]
    }

    /// Body of an empty `_index.yaml`
    fn empty_index(&self) -> &'static str {
        match self {
            ModelDir::Domains => "domains: []\n",
            ModelDir::Applications => "applications: []\n",
            ModelDir::Capabilities => "capabilities: []\n",
            ModelDir::DataEntities => "entities: []\n",
            ModelDir::Integrations => "integrations: []\n",
        }
    }
}

/// A landscape checkout on disk
pub struct Landscape {
    root: PathBuf,
    config: Config,
}

impl Landscape {
    /// Opens the landscape at the given path
    ///
    /// Only the root directory has to exist; everything below it is checked
    /// by validation.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(LandscapeError::RootNotFound(root).into());
        }

        let config = Config::for_landscape(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the landscape at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_landscape_root().ok_or(LandscapeError::NotALandscape)?;

        Self::open(root)
    }

    /// Creates the skeleton layout at the given path (idempotent)
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        let config_dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        write_if_missing(
            &config_dir.join(LANDSCAPE_CONFIG_FILE),
            "# Organization settings\norganization:\n  name: \"\"\n",
        )?;
        write_if_missing(&config_dir.join(SEQUENCES_FILE), "{}\n")?;

        for kind in ModelDir::all() {
            let dir = root.join(MODEL_DIR).join(kind.dir_name());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            write_if_missing(&dir.join(INDEX_FILE), kind.empty_index())?;
        }

        let changes_dir = root.join(CHANGES_DIR);
        fs::create_dir_all(&changes_dir).with_context(|| {
            format!("Failed to create changes directory: {}", changes_dir.display())
        })?;

        Self::open(root)
    }

    /// Returns the landscape root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the `.landscape` directory path
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Organization settings file
    pub fn landscape_config_path(&self) -> PathBuf {
        self.config_dir().join(LANDSCAPE_CONFIG_FILE)
    }

    pub fn sequences_path(&self) -> PathBuf {
        self.config_dir().join(SEQUENCES_FILE)
    }

    pub fn model_dir(&self, kind: ModelDir) -> PathBuf {
        self.root.join(MODEL_DIR).join(kind.dir_name())
    }

    pub fn index_path(&self, kind: ModelDir) -> PathBuf {
        self.model_dir(kind).join(INDEX_FILE)
    }

    pub fn changes_dir(&self) -> PathBuf {
        self.root.join(CHANGES_DIR)
    }

    /// Returns the ID sequence store
    pub fn sequence_store(&self) -> SequenceStore {
        SequenceStore::for_landscape(&self.root)
    }

    /// Returns a reader over this landscape's files
    pub fn reader(&self) -> LandscapeReader<'_> {
        LandscapeReader::new(self)
    }

    /// Default bundle output path
    pub fn bundle_path(&self) -> PathBuf {
        self.root.join(&self.config.project.bundle.output)
    }

    /// Returns `path` relative to the root, with `/` separators
    pub fn relative_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
