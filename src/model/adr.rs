//! Architecture decision record metadata
//!
//! ADRs are markdown files beside a change request; this is the YAML
//! frontmatter at the top of the file.

use serde::{Deserialize, Serialize};

use super::id::{EntityId, EntityType};
use super::schema::{Schema, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdrStatus {
    Proposed,
    Accepted,
    Deprecated,
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdrMetadata {
    pub change_id: EntityId,
    pub title: String,
    pub date: String,
    pub status: AdrStatus,
    pub applications_affected: Vec<EntityId>,
    pub capabilities_affected: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<EntityId>,
}

impl Schema for AdrMetadata {
    fn check(&self, v: &mut Violations) {
        v.id_type("change_id", &self.change_id, EntityType::Acr);
        v.non_empty("title", &self.title);
        v.id_types(
            "applications_affected",
            &self.applications_affected,
            EntityType::App,
        );
        v.id_types(
            "capabilities_affected",
            &self.capabilities_affected,
            EntityType::Cap,
        );
        if let Some(id) = &self.supersedes {
            v.id_type("supersedes", id, EntityType::Acr);
        }
        if let Some(id) = &self.superseded_by {
            v.id_type("superseded_by", id, EntityType::Acr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::decode;

    #[test]
    fn decodes_minimal_adr() {
        let yaml = r#"
change_id: FIN-ACR-001
title: Use event streaming for ledger updates
date: "2024-07-02"
status: accepted
applications_affected: [FIN-APP-001]
capabilities_affected: []
"#;
        let adr: AdrMetadata = decode(yaml).unwrap();
        assert_eq!(adr.status, AdrStatus::Accepted);
        assert!(adr.supersedes.is_none());
    }

    #[test]
    fn supersedes_must_be_a_change_id() {
        let yaml = r#"
change_id: FIN-ACR-002
title: Revisit
date: "2024-08-01"
status: proposed
applications_affected: []
capabilities_affected: []
supersedes: FIN-APP-001
"#;
        let err = decode::<AdrMetadata>(yaml).unwrap_err();
        assert!(err.to_string().contains("supersedes"));
    }
}
