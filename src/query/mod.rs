//! Read-only queries over a landscape snapshot
//!
//! A [`Snapshot`] is built once, from a freshly read landscape or from a
//! bundle, and then answers lookups without touching disk. Accessors trust
//! the snapshot; correctness is the validator's job.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{
    ApplicationPassport, Capability, CapabilityHierarchy, ChangeRequest, DataEntity,
    DomainDefinition, IntegrationEntry,
};
use crate::storage::{Bundle, LoadedLandscape};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub organization: Option<String>,
    pub domains: Vec<DomainDefinition>,
    pub applications: Vec<ApplicationPassport>,
    pub capabilities: Vec<Capability>,
    pub integrations: Vec<IntegrationEntry>,
    pub data_entities: Vec<DataEntity>,
    pub change_requests: Vec<ChangeRequest>,
    by_id: BTreeMap<String, usize>,
}

/// One bucket per entity kind
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<'a> {
    pub applications: Vec<&'a ApplicationPassport>,
    pub domains: Vec<&'a DomainDefinition>,
    pub capabilities: Vec<&'a Capability>,
    pub data_entities: Vec<&'a DataEntity>,
    pub integrations: Vec<&'a IntegrationEntry>,
}

impl SearchResults<'_> {
    pub fn total(&self) -> usize {
        self.applications.len()
            + self.domains.len()
            + self.capabilities.len()
            + self.data_entities.len()
            + self.integrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub domains: usize,
    pub applications: usize,
    pub capabilities: usize,
    pub data_entities: usize,
    pub integrations: usize,
    pub change_requests: usize,
}

impl Snapshot {
    pub fn new(
        domains: Vec<DomainDefinition>,
        applications: Vec<ApplicationPassport>,
        capabilities: Vec<Capability>,
        integrations: Vec<IntegrationEntry>,
        data_entities: Vec<DataEntity>,
        change_requests: Vec<ChangeRequest>,
    ) -> Self {
        let mut by_id = BTreeMap::new();
        for (i, app) in applications.iter().enumerate() {
            by_id.entry(app.id.to_string()).or_insert(i);
        }

        Self {
            organization: None,
            domains,
            applications,
            capabilities,
            integrations,
            data_entities,
            change_requests,
            by_id,
        }
    }

    pub fn from_loaded(loaded: &LoadedLandscape) -> Self {
        let mut snapshot = Self::new(
            loaded.domains.iter().map(|d| d.record.clone()).collect(),
            loaded.applications.iter().map(|a| a.record.clone()).collect(),
            loaded
                .capabilities
                .as_ref()
                .map(|c| c.record.capabilities.clone())
                .unwrap_or_default(),
            loaded
                .integrations
                .as_ref()
                .map(|i| i.record.integrations.clone())
                .unwrap_or_default(),
            loaded.data_entities.iter().map(|e| e.record.clone()).collect(),
            loaded.change_requests.iter().map(|c| c.record.clone()).collect(),
        );
        snapshot.organization = loaded.organization_name().map(str::to_string);
        snapshot
    }

    pub fn from_bundle(bundle: Bundle) -> Self {
        let mut snapshot = Self::new(
            bundle.domains,
            bundle.application_list,
            bundle.capabilities,
            bundle.integrations,
            bundle.data_entities,
            bundle.change_requests,
        );
        snapshot.organization = bundle.organization;
        snapshot
    }

    /// Exact id lookup
    pub fn application(&self, id: &str) -> Option<&ApplicationPassport> {
        self.by_id.get(id).map(|&i| &self.applications[i])
    }

    /// Domain lookup; the id is matched case-insensitively
    pub fn domain(&self, id: &str) -> Option<&DomainDefinition> {
        let id = id.to_uppercase();
        self.domains.iter().find(|d| d.id == *id)
    }

    pub fn applications_by_domain(&self, domain: &str) -> Vec<&ApplicationPassport> {
        let domain = domain.to_uppercase();
        self.applications
            .iter()
            .filter(|a| a.domain == *domain)
            .collect()
    }

    pub fn capabilities_by_domain(&self, domain: &str) -> Vec<&Capability> {
        let domain = domain.to_uppercase();
        self.capabilities
            .iter()
            .filter(|c| c.domain == *domain)
            .collect()
    }

    pub fn data_entities_by_domain(&self, domain: &str) -> Vec<&DataEntity> {
        let domain = domain.to_uppercase();
        self.data_entities
            .iter()
            .filter(|e| e.domain == *domain)
            .collect()
    }

    /// Integrations where the app is source or target, in registry order
    pub fn integrations_for_app(&self, app_id: &str) -> Vec<&IntegrationEntry> {
        self.integrations
            .iter()
            .filter(|i| i.involves(app_id))
            .collect()
    }

    /// Integrations between two apps in either direction, in registry order
    pub fn integrations_between(&self, a: &str, b: &str) -> Vec<&IntegrationEntry> {
        self.integrations
            .iter()
            .filter(|i| i.connects(a, b))
            .collect()
    }

    pub fn data_entities_for_app(&self, app_id: &str) -> Vec<&DataEntity> {
        self.data_entities
            .iter()
            .filter(|e| e.is_used_by(app_id))
            .collect()
    }

    /// Change requests naming the app as primary or affected
    pub fn change_requests_for_app(&self, app_id: &str) -> Vec<&ChangeRequest> {
        self.change_requests
            .iter()
            .filter(|c| c.referenced_applications().any(|id| *id == *app_id))
            .collect()
    }

    /// Every capability below `id` in the declared hierarchy
    pub fn capability_subtree(&self, id: &str) -> Vec<&Capability> {
        let hierarchy = CapabilityHierarchy::build(&self.capabilities);
        hierarchy
            .descendants(id)
            .iter()
            .filter_map(|child| self.capabilities.iter().find(|c| c.id == **child))
            .collect()
    }

    /// Case-insensitive substring search, one bucket per kind
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let needle = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);

        SearchResults {
            applications: self
                .applications
                .iter()
                .filter(|a| {
                    hit(&a.id.to_string())
                        || hit(&a.name)
                        || hit(a.domain.as_str())
                        || a.technology.stack.iter().any(|s| hit(s))
                })
                .collect(),
            domains: self
                .domains
                .iter()
                .filter(|d| hit(d.id.as_str()) || hit(&d.name) || hit(&d.description))
                .collect(),
            capabilities: self
                .capabilities
                .iter()
                .filter(|c| hit(&c.id.to_string()) || hit(&c.name) || hit(&c.description))
                .collect(),
            data_entities: self
                .data_entities
                .iter()
                .filter(|e| hit(&e.id.to_string()) || hit(&e.name) || hit(&e.description))
                .collect(),
            integrations: self
                .integrations
                .iter()
                .filter(|i| {
                    hit(&i.source.to_string())
                        || hit(&i.target.to_string())
                        || hit(&i.description)
                        || hit(&i.protocol)
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            domains: self.domains.len(),
            applications: self.applications.len(),
            capabilities: self.capabilities.len(),
            data_entities: self.data_entities.len(),
            integrations: self.integrations.len(),
            change_requests: self.change_requests.len(),
        }
    }
}
