//! Validator scenarios over generated landscapes

mod common;

use common::{empty_landscape, seed_landscape};
use landscape_cli::storage::Landscape;
use landscape_cli::validate::{self, IssueKind, Severity, ValidationOptions, ValidationStats};
use landscape_cli::validate_landscape;

fn messages(result: &landscape_cli::ValidationResult) -> Vec<String> {
    result.issues.iter().map(|i| i.to_string()).collect()
}

#[test]
fn seed_landscape_is_valid() {
    let fixture = seed_landscape();
    let result = validate_landscape(fixture.root()).unwrap();

    assert!(result.valid, "{:#?}", messages(&result));
    assert_eq!(result.error_count(), 0);
    assert_eq!(
        result.stats,
        ValidationStats {
            applications: 5,
            domains: 5,
            data_entities: 5,
            capabilities: 10,
            change_requests: 0,
        }
    );
}

#[test]
fn empty_landscape_is_valid() {
    let fixture = empty_landscape();
    let result = validate_landscape(fixture.root()).unwrap();

    assert!(result.valid, "{:#?}", messages(&result));
    assert!(result.issues.is_empty());
}

#[test]
fn duplicate_application_id_is_an_error() {
    let fixture = seed_landscape();
    fixture.add_passport("TST-APP-001-COPY", "TST-APP-001");

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(!result.valid);
    let duplicates: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::DuplicateIdentifier)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("Duplicate ID"));
    // Attributed to the second folder in name order
    assert_eq!(
        duplicates[0].file,
        "model/applications/TST-APP-001-COPY/passport.yaml"
    );
}

#[test]
fn folder_must_match_passport_id() {
    let fixture = seed_landscape();
    fixture.add_passport("WRONG-FOLDER", "TST-APP-099");

    let result = validate_landscape(fixture.root()).unwrap();

    let placement: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::PlacementMismatch)
        .collect();
    assert_eq!(placement.len(), 1);
    assert!(placement[0].message.contains("WRONG-FOLDER"));
    assert!(placement[0].message.contains("TST-APP-099"));
    assert!(placement[0].message.contains("does not match"));
    assert!(!result.valid);
}

#[test]
fn unresolved_change_reference_is_only_a_warning() {
    let fixture = seed_landscape();
    fixture.add_change("TST-ACR-001", "TST-APP-001", &["TST-APP-999"]);

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(result.valid, "{:#?}", messages(&result));
    assert_eq!(result.stats.change_requests, 1);

    let warnings: Vec<_> = result.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, IssueKind::UnresolvedReference);
    assert!(warnings[0].message.contains("TST-APP-999"));
    assert!(warnings[0].message.contains("not found in landscape"));
    assert_eq!(warnings[0].file, "changes/TST-ACR-001/change.yaml");
}

#[test]
fn id_above_counter_is_an_error() {
    let fixture = seed_landscape();
    fixture.add_passport("TST-APP-999", "TST-APP-999");

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(!result.valid);
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, IssueKind::SequenceExceeded);
    assert!(errors[0].message.contains("999"));
    assert!(errors[0].message.contains("counter is only at 1"));
    assert_eq!(errors[0].file, ".landscape/id-sequences.yaml");
}

#[test]
fn ids_without_a_counter_are_not_checked() {
    let fixture = seed_landscape();
    fixture.add_passport("NEW-APP-042", "NEW-APP-042");

    let result = validate_landscape(fixture.root()).unwrap();
    assert!(result.valid, "{:#?}", messages(&result));
}

#[test]
fn schema_failure_excludes_file_but_scan_continues() {
    let fixture = seed_landscape();
    fixture.write(
        "model/applications/FIN-APP-001/passport.yaml",
        "id: FIN-APP-001\nname: Broken\n",
    );

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(!result.valid);
    assert_eq!(result.stats.applications, 4);
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, IssueKind::SchemaViolation);
    assert_eq!(errors[0].file, "model/applications/FIN-APP-001/passport.yaml");
    assert!(errors[0].message.starts_with("Schema validation failed"));
}

#[test]
fn missing_files_are_reported() {
    let fixture = seed_landscape();
    fixture.remove("model/integrations/_index.yaml");
    fixture.remove(".landscape/config.yaml");

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(!result.valid);
    let missing: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::FileNotFound)
        .map(|i| i.message.as_str())
        .collect();
    assert_eq!(missing, vec!["Landscape config not found", "File not found"]);
}

#[test]
fn missing_root_aborts() {
    let fixture = empty_landscape();
    assert!(validate_landscape(&fixture.root().join("nope")).is_err());
}

#[test]
fn change_folder_must_match_change_id() {
    let fixture = seed_landscape();
    fixture.write(
        "changes/TST-ACR-002/change.yaml",
        &common::change_request("TST-ACR-001", "TST-APP-001", &[]),
    );

    let result = validate_landscape(fixture.root()).unwrap();

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Folder name 'TST-ACR-002' does not match change ID 'TST-ACR-001'"
    );
}

#[test]
fn adr_must_belong_to_its_change() {
    let fixture = seed_landscape();
    fixture.add_change("TST-ACR-001", "TST-APP-001", &[]);
    fixture.write(
        "changes/TST-ACR-001/adr.md",
        "---\nchange_id: TST-ACR-002\ntitle: Pick a queue\ndate: \"2024-07-02\"\nstatus: proposed\napplications_affected: []\ncapabilities_affected: []\n---\n\n# Context\n",
    );

    let result = validate_landscape(fixture.root()).unwrap();

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{:#?}", messages(&result));
    assert_eq!(errors[0].kind, IssueKind::PlacementMismatch);
    assert_eq!(errors[0].file, "changes/TST-ACR-001/adr.md");
}

#[test]
fn malformed_adr_frontmatter_is_a_schema_error() {
    let fixture = seed_landscape();
    fixture.add_change("TST-ACR-001", "TST-APP-001", &[]);
    fixture.write("changes/TST-ACR-001/adr.md", "# No frontmatter here\n");

    let result = validate_landscape(fixture.root()).unwrap();

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, IssueKind::SchemaViolation);
}

#[test]
fn duplicate_domain_ids_are_detected() {
    let fixture = seed_landscape();
    let content =
        std::fs::read_to_string(fixture.root().join("model/domains/FIN/domain.yaml")).unwrap();
    fixture.write("model/domains/FIN2/domain.yaml", &content);

    let result = validate_landscape(fixture.root()).unwrap();

    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Duplicate ID: FIN");
    assert_eq!(errors[0].file, "model/domains/FIN2/domain.yaml");
}

#[test]
fn extended_references_are_opt_in_warnings() {
    let fixture = seed_landscape();
    fixture.write(
        "model/integrations/_index.yaml",
        "integrations:\n  - {source: TST-APP-001, target: GONE-APP-001, type: event, direction: outbound, protocol: Kafka, description: ''}\n",
    );

    let landscape = Landscape::open(fixture.root()).unwrap();

    let plain = validate::validate(&landscape, ValidationOptions::default()).unwrap();
    assert!(plain.result.issues.is_empty());

    let extended = validate::validate(
        &landscape,
        ValidationOptions {
            extended_references: true,
            capability_hierarchy: false,
        },
    )
    .unwrap();
    assert!(extended.result.valid);
    let warnings: Vec<_> = extended.result.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("GONE-APP-001"));
    assert_eq!(warnings[0].file, "model/integrations/_index.yaml");
}

#[test]
fn hierarchy_checks_are_opt_in_warnings() {
    let fixture = seed_landscape();
    fixture.write(
        "model/capabilities/_index.yaml",
        r#"capabilities:
  - {id: TST-CAP-001, name: A, domain: TST, description: '', parent: TST-CAP-002, level: 0, children: [TST-CAP-002]}
  - {id: TST-CAP-002, name: B, domain: TST, description: '', parent: TST-CAP-001, level: 1, children: [TST-CAP-001]}
"#,
    );

    let landscape = Landscape::open(fixture.root()).unwrap();

    let plain = validate::validate(&landscape, ValidationOptions::default()).unwrap();
    assert!(plain.result.issues.is_empty());

    let checked = validate::validate(
        &landscape,
        ValidationOptions {
            extended_references: false,
            capability_hierarchy: true,
        },
    )
    .unwrap();
    assert!(checked.result.valid);
    assert!(checked
        .result
        .issues
        .iter()
        .all(|i| i.kind == IssueKind::HierarchyInconsistency && i.severity == Severity::Warning));
    assert!(checked
        .result
        .issues
        .iter()
        .any(|i| i.message.contains("cycle")));
}

#[test]
fn config_enables_optional_checks() {
    let fixture = seed_landscape();
    fixture.write(
        "changes/TST-ACR-001/change.yaml",
        &common::change_request("TST-ACR-001", "TST-APP-001", &[])
            .replace("capabilities_affected: []", "capabilities_affected: [TST-CAP-404]"),
    );
    fixture.write(
        ".landscape/landscape.toml",
        "[validation]\nextended_references = true\n",
    );

    let result = validate_landscape(fixture.root()).unwrap();

    assert!(result.valid);
    assert_eq!(result.warning_count(), 1);
    assert!(result.issues[0].message.contains("TST-CAP-404"));
}

#[test]
fn rerunning_starts_clean() {
    let fixture = seed_landscape();
    let first = validate_landscape(fixture.root()).unwrap();
    let second = validate_landscape(fixture.root()).unwrap();

    assert_eq!(first, second);
}
