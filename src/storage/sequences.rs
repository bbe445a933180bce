//! ID sequence store
//!
//! Counters live in `.landscape/id-sequences.yaml`.
//!
//! ## Single-writer assumption
//!
//! [`SequenceStore::allocate_next`] is a plain read-modify-write. There is
//! no locking: two processes allocating against the same file at once can
//! hand out the same ID. Callers must serialize allocations (one CLI
//! invocation at a time). Writes are atomic (temp file + rename), so a
//! reader never sees a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::landscape::{CONFIG_DIR, SEQUENCES_FILE};
use crate::model::{decode, DomainId, EntityId, EntityType, IdSequences};

pub struct SequenceStore {
    path: PathBuf,
}

impl SequenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a landscape
    pub fn for_landscape(root: &Path) -> Self {
        Self::new(root.join(CONFIG_DIR).join(SEQUENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the counters
    pub fn read(&self) -> Result<IdSequences> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ID sequences: {}", self.path.display()))?;

        decode(&content)
            .with_context(|| format!("Invalid ID sequences: {}", self.path.display()))
    }

    /// Writes all counters atomically (temp file + rename)
    pub fn write(&self, sequences: &IdSequences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content =
            serde_yaml::to_string(sequences).context("Failed to serialize ID sequences")?;

        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Allocates the next ID for `(domain, type)` and persists the counters
    ///
    /// Missing entries start at 0, so the first allocation is `...-001`.
    /// Not safe for concurrent callers; see the module docs.
    pub fn allocate_next(&self, domain: &DomainId, entity_type: EntityType) -> Result<EntityId> {
        let mut sequences = self.read()?;
        let id = sequences.allocate(domain, entity_type);
        self.write(&sequences)?;
        Ok(id)
    }
}
