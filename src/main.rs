//! Landscape CLI - Enterprise architecture landscape tooling

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = landscape_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
