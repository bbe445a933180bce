//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{id_cmd, query, validate_cmd};
use crate::storage::{Config, Landscape};

#[derive(Parser)]
#[command(name = "landscape")]
#[command(author, version, about = "Validate, bundle and query an enterprise architecture landscape")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Landscape root (defaults to the nearest directory containing .landscape/)
    #[arg(long, short = 'L', global = true, env = "LANDSCAPE_ROOT")]
    pub landscape: Option<PathBuf>,

    /// Answer queries from a bundle file instead of the landscape tree
    #[arg(long, global = true)]
    pub bundle: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new landscape
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Validate the landscape and report every issue
    Validate {
        #[command(flatten)]
        checks: validate_cmd::CheckArgs,
    },

    /// Validate and write the consolidated JSON bundle
    Bundle {
        /// Output path (defaults to [bundle] output in landscape.toml)
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[command(flatten)]
        checks: validate_cmd::CheckArgs,
    },

    /// Check a single file against a record contract
    Check {
        /// Record kind (e.g. application, change-request, adr)
        kind: String,

        /// File to check
        file: PathBuf,
    },

    /// Parse and allocate identifiers
    #[command(subcommand)]
    Id(id_cmd::IdCommands),

    /// Look up applications
    #[command(subcommand)]
    App(query::AppCommands),

    /// Look up domains
    #[command(subcommand)]
    Domain(query::DomainCommands),

    /// List capabilities
    Capabilities {
        /// Filter by domain
        #[arg(long, short)]
        domain: Option<String>,

        /// Only capabilities below this one
        #[arg(long)]
        under: Option<String>,
    },

    /// List data entities
    Entities {
        /// Filter by domain
        #[arg(long, short)]
        domain: Option<String>,

        /// Only entities used by this application
        #[arg(long)]
        app: Option<String>,
    },

    /// List integrations
    Integrations {
        /// Only integrations involving this application
        #[arg(long, conflicts_with = "between")]
        app: Option<String>,

        /// Only integrations between two applications (either direction)
        #[arg(long, num_args = 2, value_names = ["APP", "APP"])]
        between: Option<Vec<String>>,
    },

    /// Search every entity kind
    Search {
        /// Search query (case-insensitive substring)
        query: String,
    },

    /// Show landscape status overview
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::global_only()?.global.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Landscape CLI starting");

    let scope = Scope {
        landscape: cli.landscape,
        bundle: cli.bundle,
    };

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing landscape at: {}", path));
            let landscape = Landscape::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created {}", landscape.config_dir().display()),
            );
            output.success(&format!(
                "Initialized landscape at {}",
                landscape.root().display()
            ));
        }

        Commands::Validate { checks } => validate_cmd::validate(&output, &scope, checks)?,
        Commands::Bundle { out, checks } => {
            validate_cmd::bundle(&output, &scope, out.as_deref(), checks)?
        }
        Commands::Check { kind, file } => validate_cmd::check(&output, &kind, &file)?,

        Commands::Id(cmd) => id_cmd::run(cmd, &output, &scope)?,

        Commands::App(cmd) => query::app(cmd, &output, &scope)?,
        Commands::Domain(cmd) => query::domain(cmd, &output, &scope)?,
        Commands::Capabilities { domain, under } => {
            query::capabilities(&output, &scope, domain.as_deref(), under.as_deref())?
        }
        Commands::Entities { domain, app } => {
            query::entities(&output, &scope, domain.as_deref(), app.as_deref())?
        }
        Commands::Integrations { app, between } => {
            query::integrations(&output, &scope, app.as_deref(), between.as_deref())?
        }
        Commands::Search { query: text } => query::search(&output, &scope, &text)?,
        Commands::Status => query::status(&output, &scope)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Where a command reads its landscape from
pub struct Scope {
    pub landscape: Option<PathBuf>,
    pub bundle: Option<PathBuf>,
}

impl Scope {
    /// Opens the explicit landscape root, or searches upward from the
    /// current directory
    pub fn open(&self, output: &Output) -> Result<Landscape> {
        let landscape = match self.landscape.as_deref() {
            Some(root) => Landscape::open(root)?,
            None => Landscape::open_current()?,
        };
        output.verbose(&format!(
            "Opened landscape at: {}",
            landscape.root().display()
        ));
        Ok(landscape)
    }

    pub fn bundle(&self) -> Option<&Path> {
        self.bundle.as_deref()
    }
}
