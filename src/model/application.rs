//! Application passport model
//!
//! The passport is the full profile of one application: ownership,
//! technology, outbound integrations, compliance and SLA.

use serde::{Deserialize, Serialize};

use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

/// Lifecycle status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Plan,
    Build,
    Run,
    Retire,
}

/// TOGAF architecture layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TogafLayer {
    Business,
    Application,
    Technology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostingModel {
    OnPremise,
    Cloud,
    Hybrid,
    Saas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationType {
    Api,
    File,
    Event,
    Database,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationDirection {
    Inbound,
    Outbound,
    Bidirectional,
}

/// Integration declared on a passport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationIntegration {
    pub target: EntityId,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub direction: IntegrationDirection,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Owners {
    pub business: String,
    pub technical: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Technology {
    pub stack: Vec<String>,
    pub hosting: HostingModel,
    pub data_classification: DataClassification,
}

/// Free-text service levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sla {
    pub availability: String,
    pub rpo: String,
    pub rto: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationPassport {
    pub id: EntityId,
    pub name: String,
    pub domain: DomainId,
    pub status: AppStatus,
    pub togaf_layer: TogafLayer,
    pub owners: Owners,
    pub technology: Technology,
    pub integrations: Vec<ApplicationIntegration>,
    pub compliance: Vec<String>,
    pub sla: Sla,
    /// ISO date string
    pub created: String,
    pub updated: String,
}

impl Schema for ApplicationPassport {
    fn check(&self, v: &mut Violations) {
        v.id_type("id", &self.id, EntityType::App);
        v.non_empty("name", &self.name);
        if self.id.domain() != &self.domain {
            v.push(
                "domain",
                format!(
                    "'{}' does not match the domain of ID '{}'",
                    self.domain, self.id
                ),
            );
        }
        v.id_types(
            "integrations.target",
            self.integrations.iter().map(|i| &i.target),
            EntityType::App,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationRegistryEntry {
    pub id: EntityId,
    pub name: String,
    pub domain: DomainId,
}

/// Contents of `model/applications/_index.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationRegistry {
    pub applications: Vec<ApplicationRegistryEntry>,
}

impl Schema for ApplicationRegistry {
    fn check(&self, v: &mut Violations) {
        for (i, entry) in self.applications.iter().enumerate() {
            v.id_type(&format!("applications[{}].id", i), &entry.id, EntityType::App);
            v.non_empty(&format!("applications[{}].name", i), &entry.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::{decode, SchemaError};

    const PASSPORT: &str = r#"
id: FIN-APP-001
name: General Ledger
domain: FIN
status: run
togaf_layer: application
owners:
  business: Jane Doe
  technical: John Smith
technology:
  stack: [Java, PostgreSQL]
  hosting: on-premise
  data_classification: confidential
integrations:
  - target: FIN-APP-002
    type: api
    direction: outbound
    protocol: REST
compliance: [SOX]
sla:
  availability: "99.9%"
  rpo: 1h
  rto: 4h
created: "2024-01-15"
updated: "2024-06-01"
"#;

    #[test]
    fn decodes_valid_passport() {
        let passport: ApplicationPassport = decode(PASSPORT).unwrap();

        assert_eq!(passport.id.to_string(), "FIN-APP-001");
        assert_eq!(passport.status, AppStatus::Run);
        assert_eq!(passport.technology.hosting, HostingModel::OnPremise);
        assert_eq!(
            passport.integrations[0].integration_type,
            IntegrationType::Api
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let yaml = PASSPORT.replace("status: run", "status: sunset");
        assert!(decode::<ApplicationPassport>(&yaml).is_err());
    }

    #[test]
    fn rejects_non_application_id() {
        let yaml = PASSPORT.replace("id: FIN-APP-001", "id: FIN-CAP-001");
        let err = decode::<ApplicationPassport>(&yaml).unwrap_err();
        assert!(matches!(err, SchemaError::Constraint(_)));
        assert!(err.to_string().contains("FIN-APP-NNN"));
    }

    #[test]
    fn rejects_domain_mismatch() {
        let yaml = PASSPORT.replace("domain: FIN", "domain: HR");
        let err = decode::<ApplicationPassport>(&yaml).unwrap_err();
        assert!(err.to_string().contains("does not match the domain"));
    }

    #[test]
    fn rejects_empty_name() {
        let yaml = PASSPORT.replace("name: General Ledger", "name: \"\"");
        let err = decode::<ApplicationPassport>(&yaml).unwrap_err();
        assert!(err.to_string().contains("name: must not be empty"));
    }

    #[test]
    fn rejects_missing_field() {
        let yaml = PASSPORT.replace("compliance: [SOX]\n", "");
        let err = decode::<ApplicationPassport>(&yaml).unwrap_err();
        assert!(err.to_string().contains("compliance"));
    }
}
