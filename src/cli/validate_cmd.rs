//! Validation commands (validate, bundle, check)

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;

use super::app::Scope;
use super::output::Output;
use crate::model::RecordKind;
use crate::storage::{Bundle, Landscape};
use crate::validate::{self, ValidatedLandscape, ValidationOptions, ValidationResult};

/// Opt-in checks; each also turns on from `[validation]` in landscape.toml
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CheckArgs {
    /// Also check references from domains, entities, integrations and
    /// change-request capabilities (warnings)
    #[arg(long)]
    pub extended: bool,

    /// Also check capability parent/child consistency and cycles (warnings)
    #[arg(long)]
    pub hierarchy: bool,
}

impl CheckArgs {
    fn options(self, landscape: &Landscape) -> ValidationOptions {
        let mut options = ValidationOptions::from(landscape.config().project.validation);
        options.extended_references |= self.extended;
        options.capability_hierarchy |= self.hierarchy;
        options
    }
}

fn run_validation(
    output: &Output,
    landscape: &Landscape,
    checks: CheckArgs,
) -> Result<ValidatedLandscape> {
    let options = checks.options(landscape);
    output.verbose_ctx("validate", &format!("Options: {:?}", options));

    let validated = validate::validate(landscape, options)?;

    let stats = validated.result.stats;
    output.verbose_ctx(
        "validate",
        &format!(
            "Read {} domains, {} applications, {} capabilities, {} data entities, {} change requests",
            stats.domains,
            stats.applications,
            stats.capabilities,
            stats.data_entities,
            stats.change_requests
        ),
    );
    output.verbose_ctx(
        "validate",
        &format!(
            "{} error(s), {} warning(s)",
            validated.result.error_count(),
            validated.result.warning_count()
        ),
    );

    Ok(validated)
}

/// Validate the landscape; fails when any error-severity issue exists
pub fn validate(output: &Output, scope: &Scope, checks: CheckArgs) -> Result<()> {
    let landscape = scope.open(output)?;
    let validated = run_validation(output, &landscape, checks)?;
    let result = &validated.result;

    if output.is_json() {
        output.data(result);
    } else {
        print_report(result);
    }

    if !result.valid {
        bail!("Validation failed with {} error(s)", result.error_count());
    }

    Ok(())
}

fn print_report(result: &ValidationResult) {
    for issue in &result.issues {
        println!("{}", issue);
    }
    if !result.issues.is_empty() {
        println!();
    }

    let stats = result.stats;
    println!(
        "{} applications, {} domains, {} capabilities, {} data entities, {} change requests",
        stats.applications,
        stats.domains,
        stats.capabilities,
        stats.data_entities,
        stats.change_requests
    );

    if result.valid {
        println!(
            "Landscape is valid ({} warning(s))",
            result.warning_count()
        );
    } else {
        println!(
            "Landscape is invalid: {} error(s), {} warning(s)",
            result.error_count(),
            result.warning_count()
        );
    }
}

/// Write the bundle, then fail if the landscape had errors
pub fn bundle(
    output: &Output,
    scope: &Scope,
    out: Option<&Path>,
    checks: CheckArgs,
) -> Result<()> {
    let landscape = scope.open(output)?;
    let validated = run_validation(output, &landscape, checks)?;

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => landscape.bundle_path(),
    };

    let bundle = Bundle::new(&validated.landscape, validated.result, Utc::now());
    bundle.write(&path)?;
    output.verbose_ctx("bundle", &format!("Wrote {}", path.display()));

    let result = &bundle.validation_result;
    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.display().to_string(),
            "valid": result.valid,
            "errors": result.error_count(),
            "warnings": result.warning_count(),
            "stats": bundle.stats,
        }));
    } else {
        for issue in &result.issues {
            println!("{}", issue);
        }
        output.success(&format!(
            "Wrote bundle to {} ({} applications, {} integrations)",
            path.display(),
            bundle.stats.applications,
            bundle.stats.integrations
        ));
    }

    if !result.valid {
        bail!(
            "Bundle written, but the landscape has {} error(s)",
            result.error_count()
        );
    }

    Ok(())
}

/// Check one file against a record contract
pub fn check(output: &Output, kind: &str, file: &Path) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    output.verbose_ctx("check", &format!("Checking {} as {}", file.display(), kind));

    kind.check(&content)
        .with_context(|| format!("{} is not a valid {}", file.display(), kind))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file.display().to_string(),
            "kind": kind.as_str(),
            "valid": true,
        }));
    } else {
        output.success(&format!("{} is a valid {}", file.display(), kind));
    }

    Ok(())
}
