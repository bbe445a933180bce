//! Validation issues and the aggregate report

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{HierarchyError, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong; determines the severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    FileNotFound,
    SchemaViolation,
    DuplicateIdentifier,
    PlacementMismatch,
    UnresolvedReference,
    SequenceExceeded,
    HierarchyInconsistency,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::UnresolvedReference | IssueKind::HierarchyInconsistency => {
                Severity::Warning
            }
            IssueKind::FileNotFound
            | IssueKind::SchemaViolation
            | IssueKind::DuplicateIdentifier
            | IssueKind::PlacementMismatch
            | IssueKind::SequenceExceeded => Severity::Error,
        }
    }
}

/// A single finding, attributed to a file relative to the landscape root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub file: String,
    pub message: String,
    pub severity: Severity,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(kind: IssueKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: kind.severity(),
            kind,
        }
    }

    pub fn file_not_found(file: impl Into<String>) -> Self {
        Self::new(IssueKind::FileNotFound, file, "File not found")
    }

    pub fn schema(file: impl Into<String>, error: &SchemaError) -> Self {
        Self::new(
            IssueKind::SchemaViolation,
            file,
            format!("Schema validation failed: {}", error),
        )
    }

    pub fn duplicate(file: impl Into<String>, id: &str) -> Self {
        Self::new(
            IssueKind::DuplicateIdentifier,
            file,
            format!("Duplicate ID: {}", id),
        )
    }

    /// `what` names the declaring record, e.g. "passport ID"
    pub fn placement(file: impl Into<String>, folder: &str, what: &str, id: &str) -> Self {
        Self::new(
            IssueKind::PlacementMismatch,
            file,
            format!("Folder name '{}' does not match {} '{}'", folder, what, id),
        )
    }

    pub fn unresolved(file: impl Into<String>, what: &str, id: &str) -> Self {
        Self::new(
            IssueKind::UnresolvedReference,
            file,
            format!("Referenced {} '{}' not found in landscape", what, id),
        )
    }

    pub fn sequence_exceeded(file: impl Into<String>, id: &str, sequence: u64, counter: u64) -> Self {
        Self::new(
            IssueKind::SequenceExceeded,
            file,
            format!(
                "ID '{}' has sequence {} but counter is only at {}",
                id, sequence, counter
            ),
        )
    }

    pub fn hierarchy(file: impl Into<String>, error: &HierarchyError) -> Self {
        Self::new(IssueKind::HierarchyInconsistency, file, error.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.file, self.message)
    }
}

/// Counts of successfully parsed records per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub applications: usize,
    pub domains: usize,
    pub data_entities: usize,
    pub capabilities: usize,
    pub change_requests: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no issue has error severity
    pub valid: bool,
    pub issues: Vec<Issue>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    pub fn new(issues: Vec<Issue>, stats: ValidationStats) -> Self {
        Self {
            valid: !issues.iter().any(Issue::is_error),
            issues,
            stats,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_affect_validity() {
        let result = ValidationResult::new(
            vec![Issue::unresolved("changes/X/change.yaml", "application", "TST-APP-999")],
            ValidationStats::default(),
        );

        assert!(result.valid);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn any_error_invalidates() {
        let result = ValidationResult::new(
            vec![
                Issue::unresolved("a", "application", "TST-APP-999"),
                Issue::duplicate("b", "TST-APP-001"),
            ],
            ValidationStats::default(),
        );

        assert!(!result.valid);
        assert_eq!(result.errors().next().unwrap().file, "b");
    }

    #[test]
    fn messages_match_report_wording() {
        assert_eq!(
            Issue::placement("f", "WRONG-FOLDER", "passport ID", "TST-APP-099").message,
            "Folder name 'WRONG-FOLDER' does not match passport ID 'TST-APP-099'"
        );
        assert_eq!(
            Issue::sequence_exceeded("f", "TST-APP-999", 999, 1).message,
            "ID 'TST-APP-999' has sequence 999 but counter is only at 1"
        );
    }

    #[test]
    fn serializes_report_shape() {
        let result = ValidationResult::new(vec![], ValidationStats::default());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["stats"]["dataEntities"], 0);
        assert_eq!(json["stats"]["changeRequests"], 0);
    }
}
