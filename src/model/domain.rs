//! Business domain model

use serde::{Deserialize, Serialize};

use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

/// Contents of `model/domains/<dir>/domain.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainDefinition {
    pub id: DomainId,
    pub name: String,
    pub description: String,
    pub lead: String,
    pub capabilities: Vec<EntityId>,
    pub applications: Vec<EntityId>,
}

impl Schema for DomainDefinition {
    fn check(&self, v: &mut Violations) {
        v.non_empty("name", &self.name);
        v.id_types("capabilities", &self.capabilities, EntityType::Cap);
        v.id_types("applications", &self.applications, EntityType::App);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRegistryEntry {
    pub id: DomainId,
    pub name: String,
    pub lead: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRegistry {
    pub domains: Vec<DomainRegistryEntry>,
}

impl Schema for DomainRegistry {
    fn check(&self, v: &mut Violations) {
        for (i, entry) in self.domains.iter().enumerate() {
            v.non_empty(&format!("domains[{}].name", i), &entry.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::decode;

    #[test]
    fn decodes_domain_definition() {
        let yaml = r#"
id: FIN
name: Finance
description: Money in, money out
lead: Jane Doe
capabilities: [FIN-CAP-001]
applications: [FIN-APP-001, FIN-APP-002]
"#;
        let domain: DomainDefinition = decode(yaml).unwrap();
        assert_eq!(domain.id.as_str(), "FIN");
        assert_eq!(domain.applications.len(), 2);
    }

    #[test]
    fn rejects_lowercase_domain_id() {
        let yaml = "id: fin\nname: Finance\ndescription: ''\nlead: ''\ncapabilities: []\napplications: []\n";
        assert!(decode::<DomainDefinition>(yaml).is_err());
    }

    #[test]
    fn rejects_wrong_reference_types() {
        let yaml = "id: FIN\nname: Finance\ndescription: ''\nlead: ''\ncapabilities: [FIN-APP-001]\napplications: []\n";
        let err = decode::<DomainDefinition>(yaml).unwrap_err();
        assert!(err.to_string().contains("capabilities[0]"));
    }
}
