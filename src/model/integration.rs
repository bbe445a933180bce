//! Integration registry model

use serde::{Deserialize, Serialize};

use super::application::{IntegrationDirection, IntegrationType};
use super::id::{EntityId, EntityType};
use super::schema::{Schema, Violations};

/// An edge between two applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationEntry {
    pub source: EntityId,
    pub target: EntityId,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub direction: IntegrationDirection,
    pub protocol: String,
    pub description: String,
}

impl IntegrationEntry {
    /// Returns true if the application is either end of this integration
    pub fn involves(&self, app_id: &str) -> bool {
        self.source.to_string() == app_id || self.target.to_string() == app_id
    }

    /// Returns true if this integration links `a` and `b` in either orientation
    pub fn connects(&self, a: &str, b: &str) -> bool {
        let source = self.source.to_string();
        let target = self.target.to_string();
        (source == a && target == b) || (source == b && target == a)
    }
}

/// Contents of `model/integrations/_index.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationRegistry {
    pub integrations: Vec<IntegrationEntry>,
}

impl Schema for IntegrationRegistry {
    fn check(&self, v: &mut Violations) {
        for (i, entry) in self.integrations.iter().enumerate() {
            v.id_type(&format!("integrations[{}].source", i), &entry.source, EntityType::App);
            v.id_type(&format!("integrations[{}].target", i), &entry.target, EntityType::App);
        }
    }
}
