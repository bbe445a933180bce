//! ID sequence counters
//!
//! Maps each domain to the highest sequence allocated so far per entity
//! type. Counters only grow.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::id::{DomainId, EntityId, EntityType};
use super::schema::{Schema, Violations};

/// Contents of `.landscape/id-sequences.yaml`
///
/// Type keys are free-form strings so counters for types this tool does
/// not know about survive a read-modify-write cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSequences(BTreeMap<DomainId, BTreeMap<String, u64>>);

impl IdSequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded counter, if any
    pub fn counter(&self, domain: &str, entity_type: EntityType) -> Option<u64> {
        self.0
            .iter()
            .find(|(d, _)| d.as_str() == domain)
            .and_then(|(_, types)| types.get(entity_type.as_str()))
            .copied()
    }

    /// Increments the counter for `(domain, type)`, starting from 0, and
    /// returns the newly allocated ID
    pub fn allocate(&mut self, domain: &DomainId, entity_type: EntityType) -> EntityId {
        let counter = self
            .0
            .entry(domain.clone())
            .or_default()
            .entry(entity_type.as_str().to_string())
            .or_insert(0);
        *counter += 1;

        EntityId::new(domain.clone(), entity_type, *counter)
    }

    /// Iterates over `(domain, type, counter)` triples
    pub fn iter(&self) -> impl Iterator<Item = (&DomainId, &str, u64)> {
        self.0.iter().flat_map(|(domain, types)| {
            types
                .iter()
                .map(move |(ty, counter)| (domain, ty.as_str(), *counter))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Schema for IdSequences {
    fn check(&self, _v: &mut Violations) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::decode;

    #[test]
    fn allocate_starts_at_one_for_missing_entries() {
        let mut seqs = IdSequences::new();
        let fin: DomainId = "FIN".parse().unwrap();

        assert_eq!(seqs.allocate(&fin, EntityType::App).to_string(), "FIN-APP-001");
        assert_eq!(seqs.allocate(&fin, EntityType::App).to_string(), "FIN-APP-002");
        assert_eq!(seqs.allocate(&fin, EntityType::Cap).to_string(), "FIN-CAP-001");
        assert_eq!(seqs.counter("FIN", EntityType::App), Some(2));
        assert_eq!(seqs.counter("HR", EntityType::App), None);
    }

    #[test]
    fn decodes_counters_and_keeps_unknown_types() {
        let yaml = "FIN:\n  APP: 3\n  CAP: 10\nHR:\n  XYZ: 4\n";
        let seqs: IdSequences = decode(yaml).unwrap();

        assert_eq!(seqs.counter("FIN", EntityType::Cap), Some(10));
        assert_eq!(seqs.iter().count(), 3);

        let out = serde_yaml::to_string(&seqs).unwrap();
        assert!(out.contains("XYZ: 4"));
    }

    #[test]
    fn rejects_invalid_domain_keys_and_negative_counters() {
        assert!(decode::<IdSequences>("fin:\n  APP: 1\n").is_err());
        assert!(decode::<IdSequences>("FIN:\n  APP: -1\n").is_err());
    }

    #[test]
    fn empty_mapping_is_valid() {
        let seqs: IdSequences = decode("{}").unwrap();
        assert!(seqs.is_empty());
    }
}
