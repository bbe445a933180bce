//! Identifier commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Scope;
use super::output::Output;
use crate::model::{DomainId, EntityId, EntityType};

#[derive(Subcommand)]
pub enum IdCommands {
    /// Split an ID into domain, type and sequence
    Parse {
        /// Entity ID (e.g. FIN-APP-001)
        id: String,
    },

    /// Allocate the next ID for a domain and type
    ///
    /// Increments the counter in .landscape/id-sequences.yaml. Not safe to
    /// run concurrently against the same landscape.
    Next {
        /// Domain ID (e.g. FIN)
        domain: String,

        /// Entity type: APP, ACR, ENT or CAP
        entity_type: EntityType,
    },
}

pub fn run(cmd: IdCommands, output: &Output, scope: &Scope) -> Result<()> {
    match cmd {
        IdCommands::Parse { id } => parse(output, &id),
        IdCommands::Next {
            domain,
            entity_type,
        } => next(output, scope, &domain, entity_type),
    }
}

fn parse(output: &Output, raw: &str) -> Result<()> {
    let id: EntityId = raw.parse()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "domain": id.domain().as_str(),
            "type": id.entity_type(),
            "sequence": id.sequence(),
        }));
    } else {
        println!("Domain:   {}", id.domain());
        println!("Type:     {}", id.entity_type());
        println!("Sequence: {}", id.sequence());
    }

    Ok(())
}

fn next(output: &Output, scope: &Scope, domain: &str, entity_type: EntityType) -> Result<()> {
    let domain: DomainId = domain.to_uppercase().parse()?;
    let landscape = scope.open(output)?;
    let store = landscape.sequence_store();

    output.verbose_ctx(
        "id",
        &format!("Allocating {}-{} from {}", domain, entity_type, store.path().display()),
    );

    let id = store.allocate_next(&domain, entity_type)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id.to_string() }));
    } else {
        println!("{}", id);
    }

    Ok(())
}
