//! Landscape data model
//!
//! Record types, identifiers and schema contracts, without any I/O concerns.

mod id;
mod schema;
mod application;
mod domain;
mod capability;
mod data_entity;
mod integration;
mod change_request;
mod adr;
mod sequences;
mod hierarchy;

pub use id::{format_id, DomainId, EntityId, EntityType, IdError};
pub use schema::{decode, RecordKind, Schema, SchemaError, Violations};
pub use application::{
    AppStatus, ApplicationIntegration, ApplicationPassport, ApplicationRegistry,
    ApplicationRegistryEntry, DataClassification, HostingModel, IntegrationDirection,
    IntegrationType, Owners, Sla, Technology, TogafLayer,
};
pub use domain::{DomainDefinition, DomainRegistry, DomainRegistryEntry};
pub use capability::{Capability, CapabilityRegistry, MAX_CAPABILITY_LEVEL};
pub use data_entity::{
    AppDataMapping, DataEntity, DataEntityRegistry, DataEntityRegistryEntry, DataOperation,
    DataRole,
};
pub use integration::{IntegrationEntry, IntegrationRegistry};
pub use change_request::{
    AffectedApplications, Artifacts, ChangeRequest, ChangeStatus, DecisionTier, DiagramArtifact,
    DiagramType, Impact, ImpactLevel, PushTargets,
};
pub use adr::{AdrMetadata, AdrStatus};
pub use sequences::IdSequences;
pub use hierarchy::{CapabilityHierarchy, HierarchyError};
