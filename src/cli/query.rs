//! Query commands (app, domain, capabilities, entities, integrations,
//! search, status)
//!
//! These commands read the landscape once into a snapshot, or load a bundle
//! when `--bundle` is given, and never validate or write.

use anyhow::{bail, Result};
use clap::Subcommand;

use super::app::Scope;
use super::output::Output;
use crate::query::Snapshot;
use crate::storage::Bundle;
use crate::validate::{self, ValidationOptions, ValidationResult};

#[derive(Subcommand)]
pub enum AppCommands {
    /// Show an application passport with its integrations and data
    Show {
        /// Application ID
        id: String,
    },

    /// List applications
    List {
        /// Filter by domain
        #[arg(long, short)]
        domain: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DomainCommands {
    /// Show a domain with its applications, capabilities and data entities
    Show {
        /// Domain ID
        id: String,
    },

    /// List domains
    List,
}

fn load_snapshot(output: &Output, scope: &Scope) -> Result<Snapshot> {
    if let Some(path) = scope.bundle() {
        output.verbose_ctx("query", &format!("Reading bundle: {}", path.display()));
        return Ok(Snapshot::from_bundle(Bundle::read(path)?));
    }

    let landscape = scope.open(output)?;
    let read = landscape.reader().read()?;
    if !read.issues.is_empty() {
        output.verbose_ctx(
            "query",
            &format!(
                "{} file(s) could not be read; run 'landscape validate' for details",
                read.issues.len()
            ),
        );
    }

    Ok(Snapshot::from_loaded(&read.landscape))
}

pub fn app(cmd: AppCommands, output: &Output, scope: &Scope) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;

    match cmd {
        AppCommands::Show { id } => show_app(output, &snapshot, &id),
        AppCommands::List { domain } => {
            let apps: Vec<_> = match domain.as_deref() {
                Some(domain) => snapshot.applications_by_domain(domain),
                None => snapshot.applications.iter().collect(),
            };
            output.verbose_ctx("query", &format!("Found {} applications", apps.len()));

            if output.is_json() {
                output.data(&apps);
            } else if apps.is_empty() {
                println!("No applications found.");
            } else {
                println!("{:<16} {:<8} {:<8} NAME", "ID", "DOMAIN", "STATUS");
                println!("{}", "-".repeat(60));
                for app in apps {
                    println!(
                        "{:<16} {:<8} {:<8} {}",
                        app.id.to_string(),
                        app.domain.as_str(),
                        format!("{:?}", app.status).to_lowercase(),
                        app.name
                    );
                }
            }
            Ok(())
        }
    }
}

fn show_app(output: &Output, snapshot: &Snapshot, id: &str) -> Result<()> {
    let Some(app) = snapshot.application(id) else {
        bail!("Application not found: {}", id);
    };
    let integrations = snapshot.integrations_for_app(id);
    let entities = snapshot.data_entities_for_app(id);
    let changes = snapshot.change_requests_for_app(id);

    if output.is_json() {
        output.data(&serde_json::json!({
            "application": app,
            "integrations": integrations,
            "dataEntities": entities,
            "changeRequests": changes,
        }));
        return Ok(());
    }

    println!("{} - {}", app.id, app.name);
    println!("{}", "=".repeat(40));
    println!("Domain:   {}", app.domain);
    println!("Status:   {:?}", app.status);
    println!("Layer:    {:?}", app.togaf_layer);
    println!(
        "Owners:   {} (business), {} (technical)",
        app.owners.business, app.owners.technical
    );
    println!("Stack:    {}", app.technology.stack.join(", "));
    println!("Hosting:  {:?}", app.technology.hosting);

    if !integrations.is_empty() {
        println!();
        println!("Integrations ({}):", integrations.len());
        for i in &integrations {
            println!("  {} -> {} [{}]", i.source, i.target, i.protocol);
        }
    }

    if !entities.is_empty() {
        println!();
        println!("Data entities ({}):", entities.len());
        for e in &entities {
            println!("  {} - {}", e.id, e.name);
        }
    }

    if !changes.is_empty() {
        println!();
        println!("Change requests ({}):", changes.len());
        for c in &changes {
            println!("  {} - {}", c.id, c.title);
        }
    }

    Ok(())
}

pub fn domain(cmd: DomainCommands, output: &Output, scope: &Scope) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;

    match cmd {
        DomainCommands::Show { id } => {
            let Some(domain) = snapshot.domain(&id) else {
                bail!("Domain not found: {}", id);
            };
            let apps = snapshot.applications_by_domain(&id);
            let capabilities = snapshot.capabilities_by_domain(&id);
            let entities = snapshot.data_entities_by_domain(&id);

            if output.is_json() {
                output.data(&serde_json::json!({
                    "domain": domain,
                    "applications": apps,
                    "capabilities": capabilities,
                    "dataEntities": entities,
                }));
                return Ok(());
            }

            println!("{} - {}", domain.id, domain.name);
            println!("{}", "=".repeat(40));
            if !domain.lead.is_empty() {
                println!("Lead: {}", domain.lead);
            }
            if !domain.description.is_empty() {
                println!("{}", domain.description);
            }
            println!();
            println!("Applications ({}):", apps.len());
            for app in apps {
                println!("  {} - {}", app.id, app.name);
            }
            println!("Capabilities ({}):", capabilities.len());
            for cap in capabilities {
                println!("  {} - {} (L{})", cap.id, cap.name, cap.level);
            }
            println!("Data entities ({}):", entities.len());
            for entity in entities {
                println!("  {} - {}", entity.id, entity.name);
            }
        }

        DomainCommands::List => {
            if output.is_json() {
                output.data(&snapshot.domains);
            } else if snapshot.domains.is_empty() {
                println!("No domains found.");
            } else {
                println!("{:<12} {:<6} NAME", "ID", "APPS");
                println!("{}", "-".repeat(40));
                for domain in &snapshot.domains {
                    let apps = snapshot.applications_by_domain(domain.id.as_str()).len();
                    println!("{:<12} {:<6} {}", domain.id.as_str(), apps, domain.name);
                }
            }
        }
    }

    Ok(())
}

pub fn capabilities(
    output: &Output,
    scope: &Scope,
    domain: Option<&str>,
    under: Option<&str>,
) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;

    let mut caps: Vec<_> = match under {
        Some(root) => snapshot.capability_subtree(root),
        None => snapshot.capabilities.iter().collect(),
    };
    if let Some(domain) = domain {
        let domain = domain.to_uppercase();
        caps.retain(|c| c.domain == *domain);
    }

    if output.is_json() {
        output.data(&caps);
    } else if caps.is_empty() {
        println!("No capabilities found.");
    } else {
        println!("{:<16} {:<6} NAME", "ID", "LEVEL");
        println!("{}", "-".repeat(50));
        for cap in caps {
            let indent = "  ".repeat(usize::from(cap.level));
            println!("{:<16} L{:<5} {}{}", cap.id.to_string(), cap.level, indent, cap.name);
        }
    }

    Ok(())
}

pub fn entities(
    output: &Output,
    scope: &Scope,
    domain: Option<&str>,
    app: Option<&str>,
) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;

    let mut entities: Vec<_> = match domain {
        Some(domain) => snapshot.data_entities_by_domain(domain),
        None => snapshot.data_entities.iter().collect(),
    };
    if let Some(app) = app {
        entities.retain(|e| e.is_used_by(app));
    }

    if output.is_json() {
        output.data(&entities);
    } else if entities.is_empty() {
        println!("No data entities found.");
    } else {
        println!("{:<16} {:<8} {:<6} NAME", "ID", "DOMAIN", "APPS");
        println!("{}", "-".repeat(50));
        for entity in entities {
            println!(
                "{:<16} {:<8} {:<6} {}",
                entity.id.to_string(),
                entity.domain.as_str(),
                entity.applications.len(),
                entity.name
            );
        }
    }

    Ok(())
}

pub fn integrations(
    output: &Output,
    scope: &Scope,
    app: Option<&str>,
    between: Option<&[String]>,
) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;

    let integrations: Vec<_> = match (app, between) {
        (_, Some([a, b])) => snapshot.integrations_between(a, b),
        (Some(app), _) => snapshot.integrations_for_app(app),
        _ => snapshot.integrations.iter().collect(),
    };

    if output.is_json() {
        output.data(&integrations);
    } else if integrations.is_empty() {
        println!("No integrations found.");
    } else {
        println!("{:<16} {:<16} {:<10} PROTOCOL", "SOURCE", "TARGET", "TYPE");
        println!("{}", "-".repeat(60));
        for i in integrations {
            println!(
                "{:<16} {:<16} {:<10} {}",
                i.source.to_string(),
                i.target.to_string(),
                format!("{:?}", i.integration_type).to_lowercase(),
                i.protocol
            );
        }
    }

    Ok(())
}

pub fn search(output: &Output, scope: &Scope, query: &str) -> Result<()> {
    let snapshot = load_snapshot(output, scope)?;
    output.verbose_ctx("query", &format!("Searching for: {}", query));

    let results = snapshot.search(query);
    output.verbose_ctx("query", &format!("Found {} results", results.total()));

    if output.is_json() {
        output.data(&results);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Search results for '{}':", query);
    println!("{:<14} {:<16} NAME", "TYPE", "ID");
    println!("{}", "-".repeat(60));
    for app in &results.applications {
        println!("{:<14} {:<16} {}", "application", app.id.to_string(), app.name);
    }
    for domain in &results.domains {
        println!("{:<14} {:<16} {}", "domain", domain.id.as_str(), domain.name);
    }
    for cap in &results.capabilities {
        println!("{:<14} {:<16} {}", "capability", cap.id.to_string(), cap.name);
    }
    for entity in &results.data_entities {
        println!("{:<14} {:<16} {}", "data-entity", entity.id.to_string(), entity.name);
    }
    for i in &results.integrations {
        println!(
            "{:<14} {:<16} {} ({})",
            "integration",
            i.source.to_string(),
            i.target,
            i.protocol
        );
    }
    println!();
    println!("Found {} result(s)", results.total());

    Ok(())
}

/// Show landscape status overview
pub fn status(output: &Output, scope: &Scope) -> Result<()> {
    let (snapshot, result) = match scope.bundle() {
        Some(path) => {
            output.verbose_ctx("query", &format!("Reading bundle: {}", path.display()));
            let bundle = Bundle::read(path)?;
            let result = bundle.validation_result.clone();
            (Snapshot::from_bundle(bundle), result)
        }
        None => {
            let landscape = scope.open(output)?;
            let options = ValidationOptions::from(landscape.config().project.validation);
            let validated = validate::validate(&landscape, options)?;
            (Snapshot::from_loaded(&validated.landscape), validated.result)
        }
    };
    let summary = snapshot.summary();

    if output.is_json() {
        output.data(&serde_json::json!({
            "organization": snapshot.organization,
            "counts": summary,
            "valid": result.valid,
            "errors": result.error_count(),
            "warnings": result.warning_count(),
        }));
        return Ok(());
    }

    print_status(snapshot.organization.as_deref(), &summary, &result);
    Ok(())
}

fn print_status(
    organization: Option<&str>,
    summary: &crate::query::Summary,
    result: &ValidationResult,
) {
    println!("{}", organization.unwrap_or("Landscape Status"));
    println!("{}", "=".repeat(40));
    println!();
    println!("Domains:         {}", summary.domains);
    println!("Applications:    {}", summary.applications);
    println!("Capabilities:    {}", summary.capabilities);
    println!("Data entities:   {}", summary.data_entities);
    println!("Integrations:    {}", summary.integrations);
    println!("Change requests: {}", summary.change_requests);
    println!();
    if result.valid {
        println!("Valid ({} warning(s))", result.warning_count());
    } else {
        println!(
            "Invalid: {} error(s), {} warning(s)",
            result.error_count(),
            result.warning_count()
        );
    }
}
