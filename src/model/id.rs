//! Structured identifiers for landscape entities
//!
//! ID Format:
//! - Domain IDs: 2-10 uppercase ASCII letters (e.g., `FIN`, `SALES`)
//! - Entity IDs: `{DOMAIN}-{TYPE}-{SEQ}` (e.g., `FIN-APP-001`)
//!   - `TYPE` is one of `APP`, `ACR`, `ENT`, `CAP`
//!   - `SEQ` has at least 3 digits; longer digit groups are kept as written
//!
//! Entity IDs are unique across the whole landscape regardless of kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid ID format: {0} (expected DOMAIN-TYPE-NNN, e.g. FIN-APP-001)")]
    MalformedIdentifier(String),

    #[error("Invalid domain ID: '{0}' (must be 2-10 uppercase letters)")]
    InvalidDomain(String),

    #[error("Unknown entity type: '{0}' (expected APP, ACR, ENT or CAP)")]
    UnknownEntityType(String),

    #[error("Invalid sequence number: {0}")]
    InvalidSequence(String),
}

const MIN_SEQUENCE_DIGITS: usize = 3;

/// Entity type component of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    /// Application passport
    App,
    /// Architecture change request
    Acr,
    /// Data entity
    Ent,
    /// Business capability
    Cap,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::App => "APP",
            EntityType::Acr => "ACR",
            EntityType::Ent => "ENT",
            EntityType::Cap => "CAP",
        }
    }

    /// Returns all entity types
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::App,
            EntityType::Acr,
            EntityType::Ent,
            EntityType::Cap,
        ]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "APP" => Ok(EntityType::App),
            "ACR" => Ok(EntityType::Acr),
            "ENT" => Ok(EntityType::Ent),
            "CAP" => Ok(EntityType::Cap),
            _ => Err(IdError::UnknownEntityType(s.to_string())),
        }
    }
}

fn is_domain_code(s: &str) -> bool {
    (2..=10).contains(&s.len()) && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Business domain identifier (e.g., `FIN`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainId(String);

impl DomainId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DomainId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_domain_code(s) {
            return Err(IdError::InvalidDomain(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for DomainId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DomainId> for String {
    fn from(id: DomainId) -> Self {
        id.0
    }
}

impl PartialEq<str> for DomainId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Formats an entity ID from its components, zero-padding the sequence
/// to at least three digits.
///
/// The domain is not validated.
pub fn format_id(domain: &str, entity_type: EntityType, sequence: u64) -> String {
    format!(
        "{}-{}-{:0width$}",
        domain,
        entity_type,
        sequence,
        width = MIN_SEQUENCE_DIGITS
    )
}

/// Entity ID in the format `{DOMAIN}-{TYPE}-{SEQ}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: DomainId,
    entity_type: EntityType,
    sequence: u64,
    /// Number of digits as written, so `FIN-APP-0001` displays unchanged
    digits: usize,
}

impl EntityId {
    /// Creates an ID with the minimum zero-padding
    pub fn new(domain: DomainId, entity_type: EntityType, sequence: u64) -> Self {
        Self {
            domain,
            entity_type,
            sequence,
            digits: MIN_SEQUENCE_DIGITS,
        }
    }

    pub fn domain(&self) -> &DomainId {
        &self.domain
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns true if this ID names an entity of the given type
    pub fn is(&self, entity_type: EntityType) -> bool {
        self.entity_type == entity_type
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            self.domain,
            self.entity_type,
            self.sequence,
            width = self.digits.max(MIN_SEQUENCE_DIGITS)
        )
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IdError::MalformedIdentifier(s.to_string());

        let mut parts = s.split('-');
        let (Some(domain), Some(kind), Some(seq), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        if !is_domain_code(domain) {
            return Err(malformed());
        }

        // Only the exact uppercase spelling is part of the format
        let entity_type = match kind {
            "APP" | "ACR" | "ENT" | "CAP" => kind.parse()?,
            _ => return Err(malformed()),
        };

        if seq.len() < MIN_SEQUENCE_DIGITS || !seq.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }

        let sequence = seq
            .parse::<u64>()
            .map_err(|_| IdError::InvalidSequence(seq.to_string()))?;

        Ok(Self {
            domain: DomainId(domain.to_string()),
            entity_type,
            sequence,
            digits: seq.len(),
        })
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}
