//! Shared fixtures: a generated landscape on disk

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Domains of the seed landscape; each gets one application, one data
/// entity and two capabilities
pub const SEED_DOMAINS: [&str; 5] = ["TST", "FIN", "HR", "OPS", "MKT"];

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the root, creating parent directories
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.root().join(rel)).unwrap();
    }

    /// Adds a passport in the given folder
    pub fn add_passport(&self, folder: &str, id: &str) {
        self.write(
            &format!("model/applications/{folder}/passport.yaml"),
            &passport(id),
        );
    }

    /// Adds a change request in its own folder
    pub fn add_change(&self, id: &str, primary: &str, affected: &[&str]) {
        self.write(
            &format!("changes/{id}/change.yaml"),
            &change_request(id, primary, affected),
        );
    }
}

fn domain_of(id: &str) -> &str {
    id.split('-').next().unwrap()
}

pub fn passport(id: &str) -> String {
    format!(
        r#"id: {id}
name: Application {id}
domain: {domain}
status: run
togaf_layer: application
owners:
  business: Business Owner
  technical: Tech Owner
technology:
  stack: [Rust, PostgreSQL]
  hosting: cloud
  data_classification: internal
integrations: []
compliance: []
sla:
  availability: "99.9%"
  rpo: 1h
  rto: 4h
created: "2024-01-01"
updated: "2024-01-01"
"#,
        domain = domain_of(id)
    )
}

pub fn change_request(id: &str, primary: &str, affected: &[&str]) -> String {
    format!(
        r#"id: {id}
title: Change {id}
domain: {domain}
status: draft
created: "2024-07-01"
author: Architect
applications:
  primary: {primary}
  affected: [{affected}]
capabilities_affected: []
impact:
  cost: low
  risk: low
  data_sensitivity: internal
  affected_systems_count: 1
  recommended_tier: peer
decision_tier: peer
artifacts:
  diagrams: []
  data_matrix: ""
  adr: adr.md
push:
  jira_issue: ""
  confluence_page: ""
"#,
        domain = domain_of(id),
        affected = affected.join(", ")
    )
}

fn domain_definition(domain: &str) -> String {
    format!(
        r#"id: {domain}
name: Domain {domain}
description: The {domain} business area
lead: Lead {domain}
capabilities: [{domain}-CAP-001, {domain}-CAP-002]
applications: [{domain}-APP-001]
"#
    )
}

fn data_entity(domain: &str) -> String {
    format!(
        r#"id: {domain}-ENT-001
name: Record {domain}
domain: {domain}
description: Core record of {domain}
applications:
  {domain}-APP-001:
    operations: [M, C, R, U, D]
    role: master
"#
    )
}

fn capabilities(domain: &str) -> String {
    format!(
        r#"  - id: {domain}-CAP-001
    name: {domain} Management
    domain: {domain}
    description: Top level
    level: 0
    children: [{domain}-CAP-002]
  - id: {domain}-CAP-002
    name: {domain} Operations
    domain: {domain}
    description: ""
    parent: {domain}-CAP-001
    level: 1
    children: []
"#
    )
}

/// Empty but valid landscape
pub fn empty_landscape() -> Fixture {
    let dir = TempDir::new().unwrap();
    landscape_cli::Landscape::init(dir.path()).unwrap();
    Fixture { dir }
}

/// Five domains, five applications, five data entities, ten capabilities,
/// no change requests; valid
pub fn seed_landscape() -> Fixture {
    let fixture = empty_landscape();

    fixture.write(
        ".landscape/config.yaml",
        "organization:\n  name: Test Org\n",
    );

    let mut domain_index = String::from("domains:\n");
    let mut app_index = String::from("applications:\n");
    let mut entity_index = String::from("entities:\n");
    let mut cap_index = String::from("capabilities:\n");
    let mut sequences = String::new();

    for domain in SEED_DOMAINS {
        fixture.write(
            &format!("model/domains/{domain}/domain.yaml"),
            &domain_definition(domain),
        );
        fixture.add_passport(&format!("{domain}-APP-001"), &format!("{domain}-APP-001"));
        fixture.write(
            &format!("model/data-entities/{}.yaml", domain.to_lowercase()),
            &data_entity(domain),
        );

        domain_index.push_str(&format!(
            "  - {{id: {domain}, name: Domain {domain}, lead: Lead {domain}}}\n"
        ));
        app_index.push_str(&format!(
            "  - {{id: {domain}-APP-001, name: Application {domain}-APP-001, domain: {domain}}}\n"
        ));
        entity_index.push_str(&format!(
            "  - {{id: {domain}-ENT-001, name: Record {domain}, domain: {domain}}}\n"
        ));
        cap_index.push_str(&capabilities(domain));
        sequences.push_str(&format!("{domain}:\n  APP: 1\n  ENT: 1\n  CAP: 2\n"));
    }

    fixture.write("model/domains/_index.yaml", &domain_index);
    fixture.write("model/applications/_index.yaml", &app_index);
    fixture.write("model/data-entities/_index.yaml", &entity_index);
    fixture.write("model/capabilities/_index.yaml", &cap_index);
    fixture.write(
        "model/integrations/_index.yaml",
        r#"integrations:
  - source: TST-APP-001
    target: FIN-APP-001
    type: api
    direction: outbound
    protocol: REST
    description: Posts journal entries
  - source: HR-APP-001
    target: TST-APP-001
    type: file
    direction: inbound
    protocol: SFTP
    description: Nightly payroll export
"#,
    );
    fixture.write(".landscape/id-sequences.yaml", &sequences);

    fixture
}
