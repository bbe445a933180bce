//! Landscape CLI - Validation and queries for an enterprise architecture landscape
//!
//! A landscape is a tree of YAML records describing domains, applications,
//! capabilities, data entities, integrations and change requests. This crate
//! reads that tree, checks it for schema errors, duplicate or misplaced ids,
//! dangling references and stale ID counters, and answers read-only queries
//! over it.

pub mod model;
pub mod storage;
pub mod validate;
pub mod query;
pub mod cli;

pub use model::{DomainId, EntityId, EntityType, IdError};
pub use storage::Landscape;
pub use validate::{validate_landscape, Issue, IssueKind, Severity, ValidationResult};
