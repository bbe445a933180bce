//! Capability hierarchy graph
//!
//! Builds the parent/child tree declared by capabilities and reports where
//! the declarations disagree or loop. Uses petgraph for graph operations.
//! Edges point from parent to child.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::HashMap;
use thiserror::Error;

use super::capability::Capability;

#[derive(Debug, Error, PartialEq)]
pub enum HierarchyError {
    #[error("Capability '{capability}' has unknown parent '{parent}'")]
    UnknownParent { capability: String, parent: String },

    #[error("Capability '{capability}' lists unknown child '{child}'")]
    UnknownChild { capability: String, child: String },

    #[error("Capability '{child}' names parent '{parent}', but '{parent}' does not list it as a child")]
    MissingChildLink { parent: String, child: String },

    #[error("Capability '{parent}' lists child '{child}', but '{child}' does not name it as parent")]
    MissingParentLink { parent: String, child: String },

    #[error("Capability hierarchy contains a cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

#[derive(Debug, Default)]
pub struct CapabilityHierarchy {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    problems: Vec<HierarchyError>,
}

impl CapabilityHierarchy {
    /// Builds the hierarchy, recording inconsistencies as it goes
    pub fn build<'a>(capabilities: impl IntoIterator<Item = &'a Capability>) -> Self {
        let mut hierarchy = Self::default();
        let capabilities: Vec<_> = capabilities.into_iter().collect();

        // First pass: add all nodes
        for cap in &capabilities {
            let id = cap.id.to_string();
            if !hierarchy.node_map.contains_key(&id) {
                let idx = hierarchy.graph.add_node(id.clone());
                hierarchy.node_map.insert(id, idx);
            }
        }

        let by_id: HashMap<String, &Capability> = capabilities
            .iter()
            .map(|cap| (cap.id.to_string(), *cap))
            .collect();

        // Second pass: add edges from both sides of the relation
        for cap in &capabilities {
            let id = cap.id.to_string();

            if let Some(parent) = &cap.parent {
                let parent = parent.to_string();
                match by_id.get(&parent) {
                    None => hierarchy.problems.push(HierarchyError::UnknownParent {
                        capability: id.clone(),
                        parent,
                    }),
                    Some(p) => {
                        if !p.children.iter().any(|c| c.to_string() == id) {
                            hierarchy.problems.push(HierarchyError::MissingChildLink {
                                parent: parent.clone(),
                                child: id.clone(),
                            });
                        }
                        hierarchy.link(&parent, &id);
                    }
                }
            }

            for child in &cap.children {
                let child = child.to_string();
                match by_id.get(&child) {
                    None => hierarchy.problems.push(HierarchyError::UnknownChild {
                        capability: id.clone(),
                        child,
                    }),
                    Some(c) => {
                        if c.parent.as_ref().map(|p| p.to_string()) != Some(id.clone()) {
                            hierarchy.problems.push(HierarchyError::MissingParentLink {
                                parent: id.clone(),
                                child: child.clone(),
                            });
                        }
                        hierarchy.link(&id, &child);
                    }
                }
            }
        }

        hierarchy.find_cycles();
        hierarchy
    }

    fn link(&mut self, parent: &str, child: &str) {
        if let (Some(&p), Some(&c)) = (self.node_map.get(parent), self.node_map.get(child)) {
            self.graph.update_edge(p, c, ());
        }
    }

    fn find_cycles(&mut self) {
        for component in tarjan_scc(&self.graph) {
            let looped = component.len() > 1
                || self.graph.find_edge(component[0], component[0]).is_some();
            if looped {
                let mut ids: Vec<String> = component
                    .iter()
                    .filter_map(|idx| self.graph.node_weight(*idx).cloned())
                    .collect();
                ids.sort();
                self.problems.push(HierarchyError::Cycle(ids));
            }
        }
    }

    /// Inconsistencies found while building
    pub fn problems(&self) -> &[HierarchyError] {
        &self.problems
    }

    /// Returns true if the hierarchy has no cycles
    pub fn is_acyclic(&self) -> bool {
        !self
            .problems
            .iter()
            .any(|p| matches!(p, HierarchyError::Cycle(_)))
    }

    /// Returns every capability below `id`, in depth-first order
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let Some(&start) = self.node_map.get(id) else {
            return vec![];
        };

        let mut dfs = Dfs::new(&self.graph, start);
        let mut result = Vec::new();
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                if let Some(weight) = self.graph.node_weight(idx) {
                    result.push(weight.clone());
                }
            }
        }
        result
    }
}
