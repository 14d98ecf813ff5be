//! Command-line interface for the starhaul pickup-and-delivery planner.
//!
//! The entry point is `starhaul solve <path>`, where `<path>` is the single
//! input document to plan. The `solve` subcommand reads a JSON haul document, searches for the
//! cheapest plan that completes every task and prints it as a text or JSON
//! report. Options are layered with `ortho_config`: command-line flags win
//! over `STARHAUL_*` environment variables, which win over configuration
//! files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod report;
mod solve;
#[cfg(test)]
mod tests;

pub use error::CliError;

const ARG_SOLVE_CONFIG: &str = "config-path";
const ARG_SOLVE_FORMAT: &str = "format";
const ARG_SOLVE_OUTPUT: &str = "output";
const ENV_SOLVE_CONFIG: &str = "STARHAUL_CMDS_SOLVE_CONFIG_PATH";

/// Run the starhaul CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when argument parsing, configuration loading,
/// solving or writing the report fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "starhaul",
    about = "Plan the cheapest pickup-and-delivery route for a single carrier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a haul described by a JSON input document.
    Solve(solve::SolveArgs),
}
