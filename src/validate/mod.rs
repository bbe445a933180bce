//! Landscape validation
//!
//! Checks a landscape for schema errors, duplicate and misplaced ids,
//! dangling references and ids that outrun their counters. Every problem
//! becomes an [`Issue`]; the run always produces a full [`ValidationResult`].

mod report;
mod validator;

pub use report::{Issue, IssueKind, Severity, ValidationResult, ValidationStats};
pub use validator::{
    check_change_references, check_extended_references, check_hierarchy, check_identity,
    check_sequences, validate, validate_landscape, IdRegistry, ValidatedLandscape,
    ValidationOptions,
};
