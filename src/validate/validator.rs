//! Landscape validator
//!
//! Runs the phases in a fixed order over one freshly read landscape:
//!
//! 1. Structural: every file decoded against its contract (done by the reader)
//! 2. Identity and placement: global id registry, duplicates, folder names
//! 3. Cross-references: change requests to applications
//! 4. Sequence consistency: no id above its recorded counter
//!
//! Extended reference checks and capability hierarchy checks are opt-in and
//! run between phases 3 and 4. Each phase is a free function over the
//! loaded records and the [`IdRegistry`] built in phase 2.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use super::report::{Issue, IssueKind, ValidationResult, ValidationStats};
use crate::model::{CapabilityHierarchy, EntityId};
use crate::storage::{Landscape, LoadedLandscape, ReadOutcome, ValidationConfig};

/// Optional passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub extended_references: bool,
    pub capability_hierarchy: bool,
}

impl From<ValidationConfig> for ValidationOptions {
    fn from(config: ValidationConfig) -> Self {
        Self {
            extended_references: config.extended_references,
            capability_hierarchy: config.capability_hierarchy,
        }
    }
}

/// Every id declared in the landscape, in registration order
#[derive(Debug, Default)]
pub struct IdRegistry {
    ids: Vec<String>,
    seen: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an id; returns false if it was already present
    pub fn register(&mut self, id: &str) -> bool {
        if !self.seen.insert(id.to_string()) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The loaded records together with their validation result
#[derive(Debug)]
pub struct ValidatedLandscape {
    pub landscape: LoadedLandscape,
    pub result: ValidationResult,
}

/// Validates a landscape
///
/// Problems in the data end up in the result; only an unreadable directory
/// tree is an `Err`.
pub fn validate(landscape: &Landscape, options: ValidationOptions) -> Result<ValidatedLandscape> {
    let ReadOutcome {
        landscape: loaded,
        mut issues,
    } = landscape.reader().read()?;

    let registry = check_identity(&loaded, &mut issues);
    check_change_references(&loaded, &registry, &mut issues);

    if options.extended_references {
        check_extended_references(&loaded, &registry, &mut issues);
    }
    if options.capability_hierarchy {
        check_hierarchy(&loaded, &mut issues);
    }

    let sequences_file = landscape.relative_path(&landscape.sequences_path());
    check_sequences(&loaded, &registry, &sequences_file, &mut issues);

    let result = ValidationResult::new(issues, stats(&loaded));
    Ok(ValidatedLandscape {
        landscape: loaded,
        result,
    })
}

/// Opens the landscape at `root` and validates it with its configured options
pub fn validate_landscape(root: &Path) -> Result<ValidationResult> {
    let landscape = Landscape::open(root)?;
    let options = ValidationOptions::from(landscape.config().project.validation);
    Ok(validate(&landscape, options)?.result)
}

/// Phase 2: registers ids in traversal order and checks folder placement
pub fn check_identity(loaded: &LoadedLandscape, issues: &mut Vec<Issue>) -> IdRegistry {
    let mut registry = IdRegistry::new();
    let mut register = |id: &str, file: &str, issues: &mut Vec<Issue>| {
        if !registry.register(id) {
            issues.push(Issue::duplicate(file, id));
        }
    };

    for domain in &loaded.domains {
        register(domain.record.id.as_str(), domain.file.as_str(), issues);
    }

    for app in &loaded.applications {
        let id = app.record.id.to_string();
        register(&id, app.file.as_str(), issues);
        check_folder(app.folder.as_deref(), &app.file, "passport ID", &id, issues);
    }

    if let Some(caps) = &loaded.capabilities {
        for cap in &caps.record.capabilities {
            register(&cap.id.to_string(), caps.file.as_str(), issues);
        }
    }

    for entity in &loaded.data_entities {
        register(&entity.record.id.to_string(), entity.file.as_str(), issues);
    }

    for change in &loaded.change_requests {
        let id = change.record.id.to_string();
        register(&id, change.file.as_str(), issues);
        check_folder(change.folder.as_deref(), &change.file, "change ID", &id, issues);
    }

    for adr in &loaded.adrs {
        let owner = loaded
            .change_requests
            .iter()
            .find(|c| c.folder.is_some() && c.folder == adr.folder);
        if let Some(change) = owner {
            if adr.record.change_id != change.record.id {
                issues.push(Issue::new(
                    IssueKind::PlacementMismatch,
                    adr.file.as_str(),
                    format!(
                        "ADR change_id '{}' does not match change ID '{}'",
                        adr.record.change_id, change.record.id
                    ),
                ));
            }
        }
    }

    registry
}

fn check_folder(folder: Option<&str>, file: &str, what: &str, id: &str, issues: &mut Vec<Issue>) {
    if let Some(folder) = folder {
        if folder != id {
            issues.push(Issue::placement(file, folder, what, id));
        }
    }
}

/// Phase 3: every application a change request names should exist
pub fn check_change_references(
    loaded: &LoadedLandscape,
    registry: &IdRegistry,
    issues: &mut Vec<Issue>,
) {
    for change in &loaded.change_requests {
        for app in change.record.referenced_applications() {
            let app = app.to_string();
            if !registry.contains(&app) {
                issues.push(Issue::unresolved(change.file.as_str(), "application", &app));
            }
        }
    }
}

/// References outside change-request applications; all warnings
pub fn check_extended_references(
    loaded: &LoadedLandscape,
    registry: &IdRegistry,
    issues: &mut Vec<Issue>,
) {
    let mut check = |file: &str, what: &str, id: &EntityId| {
        let id = id.to_string();
        if !registry.contains(&id) {
            issues.push(Issue::unresolved(file, what, &id));
        }
    };

    for domain in &loaded.domains {
        for cap in &domain.record.capabilities {
            check(domain.file.as_str(), "capability", cap);
        }
        for app in &domain.record.applications {
            check(domain.file.as_str(), "application", app);
        }
    }

    for app in &loaded.applications {
        for integration in &app.record.integrations {
            check(app.file.as_str(), "application", &integration.target);
        }
    }

    for entity in &loaded.data_entities {
        for app in entity.record.applications.keys() {
            check(entity.file.as_str(), "application", app);
        }
    }

    if let Some(integrations) = &loaded.integrations {
        for entry in &integrations.record.integrations {
            check(integrations.file.as_str(), "application", &entry.source);
            check(integrations.file.as_str(), "application", &entry.target);
        }
    }

    for change in &loaded.change_requests {
        for cap in &change.record.capabilities_affected {
            check(change.file.as_str(), "capability", cap);
        }
    }
}

/// Parent/child agreement and cycles in the capability tree; all warnings
pub fn check_hierarchy(loaded: &LoadedLandscape, issues: &mut Vec<Issue>) {
    let Some(caps) = &loaded.capabilities else {
        return;
    };

    let hierarchy = CapabilityHierarchy::build(&caps.record.capabilities);
    for problem in hierarchy.problems() {
        issues.push(Issue::hierarchy(caps.file.as_str(), problem));
    }
}

/// Phase 4: ids must not run ahead of their counters
///
/// Ids that do not parse (domain ids) and ids whose (domain, type) has no
/// counter are skipped. Nothing is checked when the counters failed to load.
pub fn check_sequences(
    loaded: &LoadedLandscape,
    registry: &IdRegistry,
    sequences_file: &str,
    issues: &mut Vec<Issue>,
) {
    let Some(sequences) = &loaded.sequences else {
        return;
    };

    for raw in registry.iter() {
        let Ok(id) = raw.parse::<EntityId>() else {
            continue;
        };
        let Some(counter) = sequences.counter(id.domain().as_str(), id.entity_type()) else {
            continue;
        };
        if id.sequence() > counter {
            issues.push(Issue::sequence_exceeded(
                sequences_file,
                raw,
                id.sequence(),
                counter,
            ));
        }
    }
}

fn stats(loaded: &LoadedLandscape) -> ValidationStats {
    ValidationStats {
        applications: loaded.applications.len(),
        domains: loaded.domains.len(),
        data_entities: loaded.data_entities.len(),
        capabilities: loaded.capability_count(),
        change_requests: loaded.change_requests.len(),
    }
}
