//! Solve command implementation for the starhaul CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use starhaul_core::{ConfigError, HaulDocument, Simulation, SimulationConfig, Solver};
use starhaul_solver_dfs::DfsSolver;

use crate::report::{OutputFormat, Report};
use crate::{ARG_SOLVE_CONFIG, ARG_SOLVE_FORMAT, ARG_SOLVE_OUTPUT, CliError, ENV_SOLVE_CONFIG};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a haul by loading a JSON document that names the \
                 locations, the distances between them, the carrier's \
                 capacity and start location, and the items to move. The \
                 cheapest plan is found by exhaustive search and replayed \
                 before it is reported.",
    about = "Plan the cheapest route that completes every task"
)]
#[ortho_config(prefix = "STARHAUL")]
pub(crate) struct SolveArgs {
    /// Path to a JSON haul document.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) config_path: Option<Utf8PathBuf>,
    /// Report format (`text` or `json`).
    #[arg(long = ARG_SOLVE_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_SOLVE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON haul document.
    pub(crate) config_path: Utf8PathBuf,
    /// Report format.
    pub(crate) format: OutputFormat,
    /// Report destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.config_path, ARG_SOLVE_CONFIG)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match starhaul_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let config_path = args.config_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_CONFIG,
            env: ENV_SOLVE_CONFIG,
        })?;
        Ok(Self {
            config_path,
            format: args.format.unwrap_or_default(),
            output: args.output,
        })
    }
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DfsSolver::new(), &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    solver: &dyn Solver,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let simulation = load_simulation(&config.config_path)?;
    let response = solver
        .solve(&simulation)
        .map_err(|source| CliError::Solve { source })?;
    let report = Report::new(&simulation, &response)?;
    let rendered = report.render(config.format)?;
    write_report(&config, writer, &rendered)
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`HaulDocument`] from disk.
pub(crate) fn load_haul_document(path: &Utf8Path) -> Result<HaulDocument, CliError> {
    let contents = starhaul_fs::read_utf8(path).map_err(|source| CliError::OpenHaulDocument {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::ParseHaulDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a haul document and builds the simulation it describes.
pub(crate) fn load_simulation(path: &Utf8Path) -> Result<Simulation, CliError> {
    let document = load_haul_document(path)?;
    let invalid = |source: ConfigError| CliError::InvalidHaulDocument {
        path: path.to_path_buf(),
        source,
    };
    let config = SimulationConfig::try_from(document).map_err(invalid)?;
    Simulation::new(config).map_err(|err| invalid(ConfigError::from(err)))
}

fn write_report(
    config: &SolveConfig,
    writer: &mut dyn Write,
    rendered: &str,
) -> Result<(), CliError> {
    if let Some(path) = &config.output {
        starhaul_fs::write_utf8(path, rendered).map_err(|source| CliError::WriteReportFile {
            path: path.clone(),
            source,
        })?;
        info!("wrote solve report to {path}");
        return Ok(());
    }
    writer
        .write_all(rendered.as_bytes())
        .map_err(CliError::WriteSolveOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
