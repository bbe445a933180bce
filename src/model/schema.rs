//! Schema contracts for landscape records
//!
//! Every record kind decodes from YAML with serde (unknown fields rejected)
//! and then runs its own constraint checks. [`RecordKind`] is the closed
//! registry of contracts, used when a caller only knows the kind tag.

use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::{EntityId, EntityType};
use super::{
    AdrMetadata, ApplicationPassport, ApplicationRegistry, CapabilityRegistry, ChangeRequest,
    DataEntity, DataEntityRegistry, DomainDefinition, DomainRegistry, IdSequences,
    IntegrationRegistry,
};

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{0}")]
    Syntax(String),

    #[error("{}", .0.join("; "))]
    Constraint(Vec<String>),

    #[error("Unknown record kind: {0}")]
    UnknownKind(String),
}

/// Collects constraint violations for a single record
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl fmt::Display) {
        self.items.push(format!("{}: {}", field, message));
    }

    pub fn non_empty(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.push(field, "must not be empty");
        }
    }

    pub fn id_type(&mut self, field: &str, id: &EntityId, expected: EntityType) {
        if !id.is(expected) {
            self.push(
                field,
                format!("'{}' must be a {}-{}-NNN ID", id, id.domain(), expected),
            );
        }
    }

    pub fn id_types<'a>(
        &mut self,
        field: &str,
        ids: impl IntoIterator<Item = &'a EntityId>,
        expected: EntityType,
    ) {
        for (i, id) in ids.into_iter().enumerate() {
            self.id_type(&format!("{}[{}]", field, i), id, expected);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_result(self) -> Result<(), SchemaError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Constraint(self.items))
        }
    }
}

/// A record type with a validation contract beyond its serde shape
pub trait Schema: DeserializeOwned {
    /// Checks constraints serde cannot express
    fn check(&self, violations: &mut Violations);
}

/// Decodes and validates a YAML document against `T`'s contract
pub fn decode<T: Schema>(content: &str) -> Result<T, SchemaError> {
    let record: T =
        serde_yaml::from_str(content).map_err(|e| SchemaError::Syntax(e.to_string()))?;

    let mut violations = Violations::new();
    record.check(&mut violations);
    violations.into_result()?;

    Ok(record)
}

/// Closed set of record contracts found in a landscape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    IdSequences,
    DomainRegistry,
    Domain,
    ApplicationRegistry,
    Application,
    CapabilityRegistry,
    DataEntityRegistry,
    DataEntity,
    IntegrationRegistry,
    ChangeRequest,
    Adr,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::IdSequences => "id-sequences",
            RecordKind::DomainRegistry => "domain-registry",
            RecordKind::Domain => "domain",
            RecordKind::ApplicationRegistry => "application-registry",
            RecordKind::Application => "application",
            RecordKind::CapabilityRegistry => "capability-registry",
            RecordKind::DataEntityRegistry => "data-entity-registry",
            RecordKind::DataEntity => "data-entity",
            RecordKind::IntegrationRegistry => "integration-registry",
            RecordKind::ChangeRequest => "change-request",
            RecordKind::Adr => "adr",
        }
    }

    /// Returns all record kinds
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::IdSequences,
            RecordKind::DomainRegistry,
            RecordKind::Domain,
            RecordKind::ApplicationRegistry,
            RecordKind::Application,
            RecordKind::CapabilityRegistry,
            RecordKind::DataEntityRegistry,
            RecordKind::DataEntity,
            RecordKind::IntegrationRegistry,
            RecordKind::ChangeRequest,
            RecordKind::Adr,
        ]
    }

    /// Validates a YAML document against this kind's contract
    pub fn check(&self, content: &str) -> Result<(), SchemaError> {
        match self {
            RecordKind::IdSequences => decode::<IdSequences>(content).map(drop),
            RecordKind::DomainRegistry => decode::<DomainRegistry>(content).map(drop),
            RecordKind::Domain => decode::<DomainDefinition>(content).map(drop),
            RecordKind::ApplicationRegistry => decode::<ApplicationRegistry>(content).map(drop),
            RecordKind::Application => decode::<ApplicationPassport>(content).map(drop),
            RecordKind::CapabilityRegistry => decode::<CapabilityRegistry>(content).map(drop),
            RecordKind::DataEntityRegistry => decode::<DataEntityRegistry>(content).map(drop),
            RecordKind::DataEntity => decode::<DataEntity>(content).map(drop),
            RecordKind::IntegrationRegistry => decode::<IntegrationRegistry>(content).map(drop),
            RecordKind::ChangeRequest => decode::<ChangeRequest>(content).map(drop),
            RecordKind::Adr => decode::<AdrMetadata>(content).map(drop),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        RecordKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SchemaError::UnknownKind(s.to_string()))
    }
}
