//! Business capability model (L0 strategic through L4 atomic)

use serde::{Deserialize, Serialize};

use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

pub const MAX_CAPABILITY_LEVEL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Capability {
    pub id: EntityId,
    pub name: String,
    pub domain: DomainId,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityId>,
    pub level: u8,
    pub children: Vec<EntityId>,
}

impl Capability {
    fn check_at(&self, prefix: &str, v: &mut Violations) {
        v.id_type(&format!("{}id", prefix), &self.id, EntityType::Cap);
        v.non_empty(&format!("{}name", prefix), &self.name);
        if let Some(parent) = &self.parent {
            v.id_type(&format!("{}parent", prefix), parent, EntityType::Cap);
        }
        if self.level > MAX_CAPABILITY_LEVEL {
            v.push(
                &format!("{}level", prefix),
                format!("{} is outside 0..={}", self.level, MAX_CAPABILITY_LEVEL),
            );
        }
        v.id_types(&format!("{}children", prefix), &self.children, EntityType::Cap);
    }
}

impl Schema for Capability {
    fn check(&self, v: &mut Violations) {
        self.check_at("", v);
    }
}

/// Contents of `model/capabilities/_index.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityRegistry {
    pub capabilities: Vec<Capability>,
}

impl Schema for CapabilityRegistry {
    fn check(&self, v: &mut Violations) {
        for (i, cap) in self.capabilities.iter().enumerate() {
            cap.check_at(&format!("capabilities[{}].", i), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::decode;

    #[test]
    fn parent_is_optional() {
        let yaml = r#"
capabilities:
  - id: FIN-CAP-001
    name: Financial Management
    domain: FIN
    description: Top level
    level: 0
    children: [FIN-CAP-002]
  - id: FIN-CAP-002
    name: Accounting
    domain: FIN
    description: ""
    parent: FIN-CAP-001
    level: 1
    children: []
"#;
        let registry: CapabilityRegistry = decode(yaml).unwrap();
        assert_eq!(registry.capabilities.len(), 2);
        assert!(registry.capabilities[0].parent.is_none());
        assert_eq!(
            registry.capabilities[1].parent.as_ref().map(|p| p.to_string()),
            Some("FIN-CAP-001".to_string())
        );
    }

    #[test]
    fn rejects_level_above_four() {
        let yaml = "id: FIN-CAP-001\nname: X\ndomain: FIN\ndescription: ''\nlevel: 5\nchildren: []\n";
        let err = decode::<Capability>(yaml).unwrap_err();
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn rejects_negative_level() {
        let yaml = "id: FIN-CAP-001\nname: X\ndomain: FIN\ndescription: ''\nlevel: -1\nchildren: []\n";
        assert!(decode::<Capability>(yaml).is_err());
    }
}
