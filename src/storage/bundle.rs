//! Bundle artifact
//!
//! One JSON document holding every validated collection plus the validation
//! result, for read-only consumers that should not walk the tree themselves.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reader::LoadedLandscape;
use crate::model::{
    ApplicationPassport, Capability, ChangeRequest, DataEntity, DomainDefinition,
    IntegrationEntry,
};
use crate::validate::ValidationResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    pub applications: usize,
    pub domains: usize,
    pub capabilities: usize,
    pub data_entities: usize,
    pub integrations: usize,
    pub change_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub domains: Vec<DomainDefinition>,
    /// Passports keyed by id; the first passport wins when ids collide
    pub applications: BTreeMap<String, ApplicationPassport>,
    /// Passports in traversal order
    pub application_list: Vec<ApplicationPassport>,
    pub capabilities: Vec<Capability>,
    pub integrations: Vec<IntegrationEntry>,
    pub data_entities: Vec<DataEntity>,
    pub change_requests: Vec<ChangeRequest>,
    pub stats: BundleStats,
    pub validation_result: ValidationResult,
}

impl Bundle {
    /// Assembles a bundle from whatever was loaded, valid or not
    pub fn new(
        loaded: &LoadedLandscape,
        validation_result: ValidationResult,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let application_list: Vec<ApplicationPassport> = loaded
            .applications
            .iter()
            .map(|app| app.record.clone())
            .collect();

        let mut applications = BTreeMap::new();
        for app in &application_list {
            applications
                .entry(app.id.to_string())
                .or_insert_with(|| app.clone());
        }

        let capabilities = loaded
            .capabilities
            .as_ref()
            .map(|c| c.record.capabilities.clone())
            .unwrap_or_default();

        let integrations = loaded
            .integrations
            .as_ref()
            .map(|i| i.record.integrations.clone())
            .unwrap_or_default();

        let mut bundle = Self {
            generated_at,
            organization: loaded.organization_name().map(str::to_string),
            domains: loaded.domains.iter().map(|d| d.record.clone()).collect(),
            applications,
            application_list,
            capabilities,
            integrations,
            data_entities: loaded
                .data_entities
                .iter()
                .map(|e| e.record.clone())
                .collect(),
            change_requests: loaded
                .change_requests
                .iter()
                .map(|c| c.record.clone())
                .collect(),
            stats: BundleStats::default(),
            validation_result,
        };
        bundle.stats = bundle.compute_stats();
        bundle
    }

    fn compute_stats(&self) -> BundleStats {
        BundleStats {
            applications: self.application_list.len(),
            domains: self.domains.len(),
            capabilities: self.capabilities.len(),
            data_entities: self.data_entities.len(),
            integrations: self.integrations.len(),
            change_requests: self.change_requests.len(),
        }
    }

    /// Writes the bundle atomically (temp file + rename)
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize bundle")?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Reads a previously written bundle
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse bundle: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Landscape, ModelDir};
    use crate::validate::ValidationStats;
    use tempfile::TempDir;

    const CAPABILITIES: &str = r#"capabilities:
  - id: FIN-CAP-001
    name: Accounting
    domain: FIN
    description: ''
    level: 0
    children: []
"#;

    #[test]
    fn write_then_read_keeps_collections() {
        let dir = TempDir::new().unwrap();
        let ls = Landscape::init(dir.path()).unwrap();
        fs::write(ls.index_path(ModelDir::Capabilities), CAPABILITIES).unwrap();

        let out = ls.reader().read().unwrap();
        let result = ValidationResult::new(out.issues, ValidationStats::default());
        let bundle = Bundle::new(&out.landscape, result, Utc::now());

        let path = dir.path().join("dist").join("bundle.json");
        bundle.write(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let reread = Bundle::read(&path).unwrap();
        assert_eq!(reread.stats.capabilities, 1);
        assert_eq!(reread.capabilities[0].name, "Accounting");
        assert!(reread.validation_result.valid);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let ls = Landscape::init(dir.path()).unwrap();
        let out = ls.reader().read().unwrap();
        let result = ValidationResult::new(vec![], ValidationStats::default());

        let json = serde_json::to_value(Bundle::new(&out.landscape, result, Utc::now())).unwrap();

        for key in [
            "generatedAt",
            "applicationList",
            "dataEntities",
            "changeRequests",
            "validationResult",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["stats"]["integrations"], 0);
    }

    #[test]
    fn read_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(&path, "not json").unwrap();

        assert!(Bundle::read(&path).is_err());
    }
}
