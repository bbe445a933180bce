//! Architecture change request model

use serde::{Deserialize, Serialize};

use super::application::DataClassification;
use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Draft,
    Review,
    Approved,
    Rejected,
    Implemented,
}

/// Cost or risk rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// Governance level required to approve a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionTier {
    /// Enterprise architecture council
    Eac,
    Peer,
    Individual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    ArchChange,
    ContextC4,
    CapabilityImpact,
    DataFlow,
    CurrentVsTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramArtifact {
    #[serde(rename = "type")]
    pub diagram_type: DiagramType,
    /// Path to the `.mmd` source, relative to the change folder
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Impact {
    pub cost: ImpactLevel,
    pub risk: ImpactLevel,
    pub data_sensitivity: DataClassification,
    pub affected_systems_count: u32,
    pub recommended_tier: DecisionTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffectedApplications {
    pub primary: EntityId,
    pub affected: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifacts {
    pub diagrams: Vec<DiagramArtifact>,
    pub data_matrix: String,
    /// ADR markdown file, relative to the change folder (may be empty)
    pub adr: String,
}

/// Ticket and wiki references; empty strings until pushed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushTargets {
    pub jira_issue: String,
    pub confluence_page: String,
}

/// Contents of `changes/<id>/change.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeRequest {
    pub id: EntityId,
    pub title: String,
    pub domain: DomainId,
    pub status: ChangeStatus,
    pub created: String,
    pub author: String,
    pub applications: AffectedApplications,
    pub capabilities_affected: Vec<EntityId>,
    pub impact: Impact,
    pub decision_tier: DecisionTier,
    pub artifacts: Artifacts,
    pub push: PushTargets,
}

impl ChangeRequest {
    /// Primary application followed by the affected list
    pub fn referenced_applications(&self) -> impl Iterator<Item = &EntityId> {
        std::iter::once(&self.applications.primary).chain(self.applications.affected.iter())
    }
}

impl Schema for ChangeRequest {
    fn check(&self, v: &mut Violations) {
        v.id_type("id", &self.id, EntityType::Acr);
        v.non_empty("title", &self.title);
        v.id_type(
            "applications.primary",
            &self.applications.primary,
            EntityType::App,
        );
        v.id_types(
            "applications.affected",
            &self.applications.affected,
            EntityType::App,
        );
        v.id_types(
            "capabilities_affected",
            &self.capabilities_affected,
            EntityType::Cap,
        );
    }
}
