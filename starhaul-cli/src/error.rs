//! Error types emitted by the starhaul CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use starhaul_core::{ActionError, ConfigError, SolveError};
use thiserror::Error;

/// Errors emitted by the starhaul CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the haul document failed.
    #[error("failed to open haul document at {path:?}: {source}")]
    OpenHaulDocument {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The haul document is not valid JSON for the expected shape.
    #[error("failed to parse haul document JSON at {path:?}: {source}")]
    ParseHaulDocument {
        /// Document path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The haul document decoded but describes an invalid haul.
    #[error("haul document {path:?} is invalid: {source}")]
    InvalidHaulDocument {
        /// Document path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
    /// The solver found no plan.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        source: SolveError,
    },
    /// The returned plan could not be replayed on a fresh simulation.
    #[error("plan does not replay: {source}")]
    ReplayPlan {
        /// First action that failed.
        source: ActionError,
    },
    /// Serialising the JSON report failed.
    #[error("failed to serialise solve report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report to standard output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
    /// Writing the report to the requested file failed.
    #[error("failed to write solve report to {path:?}: {source}")]
    WriteReportFile {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
