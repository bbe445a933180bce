//! Data entity model
//!
//! A data entity records which applications touch a business object and
//! how (CRUD plus Master/Store operations).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOperation {
    #[serde(rename = "M")]
    Master,
    #[serde(rename = "C")]
    Create,
    #[serde(rename = "R")]
    Read,
    #[serde(rename = "U")]
    Update,
    #[serde(rename = "D")]
    Delete,
    #[serde(rename = "S")]
    Store,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataRole {
    Master,
    Consumer,
    Producer,
    Store,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppDataMapping {
    pub operations: Vec<DataOperation>,
    pub role: DataRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataEntity {
    pub id: EntityId,
    pub name: String,
    pub domain: DomainId,
    pub description: String,
    /// Application ID -> how that application uses the entity
    pub applications: BTreeMap<EntityId, AppDataMapping>,
}

impl DataEntity {
    /// Returns true if the application has a mapping for this entity
    pub fn is_used_by(&self, app_id: &str) -> bool {
        self.applications.keys().any(|id| id.to_string() == app_id)
    }
}

impl Schema for DataEntity {
    fn check(&self, v: &mut Violations) {
        v.id_type("id", &self.id, EntityType::Ent);
        v.non_empty("name", &self.name);
        for app in self.applications.keys() {
            v.id_type("applications", app, EntityType::App);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataEntityRegistryEntry {
    pub id: EntityId,
    pub name: String,
    pub domain: DomainId,
}

/// Contents of `model/data-entities/_index.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataEntityRegistry {
    pub entities: Vec<DataEntityRegistryEntry>,
}

impl Schema for DataEntityRegistry {
    fn check(&self, v: &mut Violations) {
        for (i, entry) in self.entities.iter().enumerate() {
            v.id_type(&format!("entities[{}].id", i), &entry.id, EntityType::Ent);
            v.non_empty(&format!("entities[{}].name", i), &entry.name);
        }
    }
}
