//! # Storage Layer
//!
//! Reads and writes the landscape tree and the tool's own files.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Organization settings | YAML | `.landscape/config.yaml` |
//! | ID counters | YAML | `.landscape/id-sequences.yaml` |
//! | Tool config | TOML | `.landscape/landscape.toml` |
//! | Registries | YAML | `model/<kind>/_index.yaml` |
//! | Records | YAML | `model/<kind>/<ID>/*.yaml`, `model/data-entities/*.yaml` |
//! | Change requests | YAML | `changes/<ID>/change.yaml` |
//! | ADRs | Markdown + YAML frontmatter | `changes/<ID>/<adr>.md` |
//! | Bundle | JSON | `landscape-data.json` (configurable) |
//!
//! ## Concurrency
//!
//! None. The ID counter file assumes a single writer; see [`SequenceStore`].
//! Writes are atomic (temp file + rename).
//!
//! ## Key Types
//!
//! - [`Landscape`] - Entry point for a landscape on disk
//! - [`LandscapeReader`] - Loads every record, collecting per-file issues
//! - [`SequenceStore`] - Reads and allocates ID counters
//! - [`Bundle`] - Consolidated JSON artifact
//! - [`Config`] - Landscape and global tool configuration

mod config;
mod landscape;
mod sequences;
mod frontmatter;
mod reader;
mod bundle;

pub use config::{
    BundleConfig, Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig,
    ValidationConfig,
};
pub use landscape::{
    Landscape, LandscapeError, ModelDir, CHANGES_DIR, CONFIG_DIR, INDEX_FILE,
    LANDSCAPE_CONFIG_FILE, MODEL_DIR, SEQUENCES_FILE, TOOL_CONFIG_FILE,
};
pub use sequences::SequenceStore;
pub use reader::{
    LandscapeReader, LoadedLandscape, Located, ReadOutcome, CHANGE_FILE, DOMAIN_FILE,
    PASSPORT_FILE,
};
pub use bundle::{Bundle, BundleStats};
