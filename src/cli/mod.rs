//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Landscape setup | `init` |
//! | Validation | Consistency checks and artifacts | `validate`, `bundle`, `check` |
//! | Identifiers | ID parsing and allocation | `id parse`, `id next` |
//! | Query | Read-only lookups | `app show`, `domain list`, `integrations`, `search`, `status` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default comes from `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! landscape --verbose validate
//! ```
//!
//! ## Exit Status
//!
//! `validate` and `bundle` exit non-zero when the landscape has any
//! error-severity issue. `bundle` still writes the artifact first.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod validate_cmd;
mod id_cmd;
mod query;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
