//! Landscape reader
//!
//! Walks the landscape tree and decodes every record into memory. A file
//! that is missing, unreadable or fails its schema becomes an [`Issue`] and
//! the walk continues; only an unreadable directory aborts the read.
//!
//! Directory entries are visited in name order so that traversal order is
//! stable across platforms.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::frontmatter;
use super::landscape::{Landscape, ModelDir, INDEX_FILE};
use crate::model::{
    decode, AdrMetadata, ApplicationPassport, ApplicationRegistry, CapabilityRegistry,
    ChangeRequest, DataEntity, DataEntityRegistry, DomainDefinition, DomainRegistry, IdSequences,
    IntegrationRegistry, Schema, SchemaError,
};
use crate::validate::{Issue, IssueKind};

pub const DOMAIN_FILE: &str = "domain.yaml";
pub const PASSPORT_FILE: &str = "passport.yaml";
pub const CHANGE_FILE: &str = "change.yaml";

/// A decoded record and where it came from
#[derive(Debug, Clone)]
pub struct Located<T> {
    pub record: T,
    /// Path relative to the landscape root
    pub file: String,
    /// Containing folder name, for directory-per-entity kinds
    pub folder: Option<String>,
}

/// Everything that decoded successfully
#[derive(Debug, Default)]
pub struct LoadedLandscape {
    /// Organization settings (free-form)
    pub organization: Option<serde_yaml::Value>,
    pub sequences: Option<IdSequences>,
    pub domain_registry: Option<DomainRegistry>,
    pub domains: Vec<Located<DomainDefinition>>,
    pub application_registry: Option<ApplicationRegistry>,
    pub applications: Vec<Located<ApplicationPassport>>,
    pub capabilities: Option<Located<CapabilityRegistry>>,
    pub data_entity_registry: Option<DataEntityRegistry>,
    pub data_entities: Vec<Located<DataEntity>>,
    pub integrations: Option<Located<IntegrationRegistry>>,
    pub change_requests: Vec<Located<ChangeRequest>>,
    /// ADR frontmatter; `folder` is the owning change folder
    pub adrs: Vec<Located<AdrMetadata>>,
}

impl LoadedLandscape {
    /// Organization name from `organization.name`, if set
    pub fn organization_name(&self) -> Option<&str> {
        self.organization
            .as_ref()?
            .get("organization")?
            .get("name")?
            .as_str()
            .filter(|name| !name.is_empty())
    }

    pub fn capability_count(&self) -> usize {
        self.capabilities
            .as_ref()
            .map_or(0, |c| c.record.capabilities.len())
    }
}

/// Result of a read: the records plus every per-file problem
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub landscape: LoadedLandscape,
    pub issues: Vec<Issue>,
}

pub struct LandscapeReader<'a> {
    landscape: &'a Landscape,
}

impl<'a> LandscapeReader<'a> {
    pub fn new(landscape: &'a Landscape) -> Self {
        Self { landscape }
    }

    /// Reads the whole tree
    pub fn read(&self) -> Result<ReadOutcome> {
        let mut out = ReadOutcome::default();
        let ls = self.landscape;

        let config_path = ls.landscape_config_path();
        if config_path.is_file() {
            out.landscape.organization = self.load_with(&config_path, &mut out.issues, |content| {
                serde_yaml::from_str(content).map_err(|e| SchemaError::Syntax(e.to_string()))
            });
        } else {
            out.issues.push(Issue::new(
                IssueKind::FileNotFound,
                ls.relative_path(&config_path),
                "Landscape config not found",
            ));
        }

        out.landscape.sequences = self.load(&ls.sequences_path(), &mut out.issues);

        // Domains
        out.landscape.domain_registry =
            self.load(&ls.index_path(ModelDir::Domains), &mut out.issues);
        out.landscape.domains =
            self.load_folders(&ls.model_dir(ModelDir::Domains), DOMAIN_FILE, &mut out.issues)?;

        // Applications
        out.landscape.application_registry =
            self.load(&ls.index_path(ModelDir::Applications), &mut out.issues);
        out.landscape.applications = self.load_folders(
            &ls.model_dir(ModelDir::Applications),
            PASSPORT_FILE,
            &mut out.issues,
        )?;

        // Capabilities (registry only)
        let cap_path = ls.index_path(ModelDir::Capabilities);
        out.landscape.capabilities = self
            .load(&cap_path, &mut out.issues)
            .map(|record| self.locate(record, &cap_path, None));

        // Data entities (flat files beside the registry)
        out.landscape.data_entity_registry =
            self.load(&ls.index_path(ModelDir::DataEntities), &mut out.issues);
        let entity_dir = ls.model_dir(ModelDir::DataEntities);
        for name in list_files(&entity_dir, ".yaml")? {
            if name == INDEX_FILE {
                continue;
            }
            let path = entity_dir.join(&name);
            if let Some(record) = self.load(&path, &mut out.issues) {
                out.landscape.data_entities.push(self.locate(record, &path, None));
            }
        }

        // Integrations (registry only)
        let int_path = ls.index_path(ModelDir::Integrations);
        out.landscape.integrations = self
            .load(&int_path, &mut out.issues)
            .map(|record| self.locate(record, &int_path, None));

        // Change requests and their ADRs
        out.landscape.change_requests =
            self.load_folders(&ls.changes_dir(), CHANGE_FILE, &mut out.issues)?;
        for change in &out.landscape.change_requests {
            if let Some(adr) = self.load_adr(change, &mut out.issues) {
                out.landscape.adrs.push(adr);
            }
        }

        Ok(out)
    }

    /// Loads `<dir>/<sub>/<file_name>` for every subdirectory holding one
    fn load_folders<T: Schema>(
        &self,
        dir: &Path,
        file_name: &str,
        issues: &mut Vec<Issue>,
    ) -> Result<Vec<Located<T>>> {
        let mut records = Vec::new();

        for folder in list_dirs(dir)? {
            let path = dir.join(&folder).join(file_name);
            if !path.is_file() {
                continue;
            }
            if let Some(record) = self.load(&path, issues) {
                records.push(self.locate(record, &path, Some(folder)));
            }
        }

        Ok(records)
    }

    fn load_adr(
        &self,
        change: &Located<ChangeRequest>,
        issues: &mut Vec<Issue>,
    ) -> Option<Located<AdrMetadata>> {
        let adr_file = change.record.artifacts.adr.as_str();
        if !adr_file.ends_with(".md") {
            return None;
        }

        let folder = change.folder.as_deref()?;
        let path = self.landscape.changes_dir().join(folder).join(adr_file);
        if !path.is_file() {
            return None;
        }

        self.load_with(&path, issues, |content| {
            let (yaml, _body) = frontmatter::split(content)?;
            decode::<AdrMetadata>(yaml)
        })
        .map(|record| self.locate(record, &path, Some(folder.to_string())))
    }

    fn load<T: Schema>(&self, path: &Path, issues: &mut Vec<Issue>) -> Option<T> {
        if !path.is_file() {
            issues.push(Issue::file_not_found(self.landscape.relative_path(path)));
            return None;
        }
        self.load_with(path, issues, decode::<T>)
    }

    fn load_with<T>(
        &self,
        path: &Path,
        issues: &mut Vec<Issue>,
        parse: impl FnOnce(&str) -> Result<T, SchemaError>,
    ) -> Option<T> {
        let file = self.landscape.relative_path(path);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                issues.push(Issue::new(
                    IssueKind::SchemaViolation,
                    file,
                    format!("Failed to read file: {}", e),
                ));
                return None;
            }
        };

        match parse(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                issues.push(Issue::schema(file, &e));
                None
            }
        }
    }

    fn locate<T>(&self, record: T, path: &Path, folder: Option<String>) -> Located<T> {
        Located {
            record,
            file: self.landscape.relative_path(path),
            folder,
        }
    }
}

/// Lists subdirectory names in name order; a missing directory is empty
fn list_dirs(dir: &Path) -> Result<Vec<String>> {
    list_entries(dir, |path| path.is_dir())
}

/// Lists file names with the given suffix in name order (non-recursive)
fn list_files(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    let mut names = list_entries(dir, |path| path.is_file())?;
    names.retain(|name| name.ends_with(suffix));
    Ok(names)
}

fn list_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        if keep(&entry.path()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOMAIN: &str = "id: FIN\nname: Finance\ndescription: ''\nlead: ''\ncapabilities: []\napplications: []\n";

    fn landscape() -> (TempDir, Landscape) {
        let dir = TempDir::new().unwrap();
        let landscape = Landscape::init(dir.path()).unwrap();
        (dir, landscape)
    }

    #[test]
    fn empty_skeleton_reads_cleanly() {
        let (_dir, ls) = landscape();
        let out = ls.reader().read().unwrap();

        assert!(out.issues.is_empty(), "{:?}", out.issues);
        assert!(out.landscape.sequences.is_some());
        assert_eq!(out.landscape.capability_count(), 0);
        assert!(out.landscape.organization_name().is_none());
    }

    #[test]
    fn missing_files_are_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let ls = Landscape::open(dir.path()).unwrap();
        let out = ls.reader().read().unwrap();

        assert!(out
            .issues
            .iter()
            .any(|i| i.message == "Landscape config not found"));
        assert!(out
            .issues
            .iter()
            .any(|i| i.file == "model/applications/_index.yaml" && i.kind == IssueKind::FileNotFound));
    }

    #[test]
    fn one_bad_file_does_not_stop_the_walk() {
        let (_dir, ls) = landscape();
        let domains = ls.model_dir(ModelDir::Domains);
        fs::create_dir_all(domains.join("BAD")).unwrap();
        fs::write(domains.join("BAD").join(DOMAIN_FILE), "id: [oops\n").unwrap();
        fs::create_dir_all(domains.join("FIN")).unwrap();
        fs::write(domains.join("FIN").join(DOMAIN_FILE), DOMAIN).unwrap();

        let out = ls.reader().read().unwrap();

        assert_eq!(out.landscape.domains.len(), 1);
        assert_eq!(out.landscape.domains[0].folder.as_deref(), Some("FIN"));
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.issues[0].file, "model/domains/BAD/domain.yaml");
        assert!(out.issues[0].message.starts_with("Schema validation failed"));
    }

    #[test]
    fn folders_without_record_file_are_skipped() {
        let (_dir, ls) = landscape();
        fs::create_dir_all(ls.model_dir(ModelDir::Applications).join("FIN-APP-001")).unwrap();

        let out = ls.reader().read().unwrap();

        assert!(out.landscape.applications.is_empty());
        assert!(out.issues.is_empty());
    }

    #[test]
    fn data_entity_index_is_not_an_entity() {
        let (_dir, ls) = landscape();
        let dir = ls.model_dir(ModelDir::DataEntities);
        fs::write(
            dir.join("customer.yaml"),
            "id: FIN-ENT-001\nname: Customer\ndomain: FIN\ndescription: ''\napplications: {}\n",
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let out = ls.reader().read().unwrap();

        assert_eq!(out.landscape.data_entities.len(), 1);
        assert_eq!(
            out.landscape.data_entities[0].file,
            "model/data-entities/customer.yaml"
        );
    }

    #[test]
    fn reads_organization_name() {
        let (_dir, ls) = landscape();
        fs::write(
            ls.landscape_config_path(),
            "organization:\n  name: Acme Corp\n",
        )
        .unwrap();

        let out = ls.reader().read().unwrap();
        assert_eq!(out.landscape.organization_name(), Some("Acme Corp"));
    }
}
