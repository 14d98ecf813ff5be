//! Plan reports written by the `solve` subcommand.

use std::fmt;

use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};
use starhaul_core::{Action, Diagnostics, Simulation, SolveResponse};

use crate::CliError;

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Numbered action list followed by the estimated and replayed costs.
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

/// A solved plan checked against a fresh replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Report {
    pub(crate) actions: Vec<Action>,
    pub(crate) descriptions: Vec<String>,
    pub(crate) estimated_cost: u64,
    pub(crate) actual_cost: u64,
    pub(crate) diagnostics: Diagnostics,
}

impl Report {
    /// Replay the response's plan from `simulation` and record both costs.
    ///
    /// A cost disagreement is logged but still reported; an illegal plan is
    /// an error.
    pub(crate) fn new(
        simulation: &Simulation,
        response: &SolveResponse,
    ) -> Result<Self, CliError> {
        let plan = &response.plan;
        let replay = plan
            .replay(simulation)
            .map_err(|source| CliError::ReplayPlan { source })?;
        if replay.cost != plan.cost {
            warn!(
                "replayed cost {} differs from estimated cost {}",
                replay.cost, plan.cost
            );
        }
        if !replay.completed {
            warn!("replayed plan leaves tasks outstanding");
        }
        Ok(Self {
            actions: plan.actions.clone(),
            descriptions: plan.descriptions(),
            estimated_cost: plan.cost,
            actual_cost: replay.cost,
            diagnostics: response.diagnostics,
        })
    }

    /// Render the report in `format`, newline-terminated.
    pub(crate) fn render(&self, format: OutputFormat) -> Result<String, CliError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => {
                let mut payload =
                    serde_json::to_string_pretty(self).map_err(CliError::SerialiseReport)?;
                payload.push('\n');
                Ok(payload)
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Actions to take:")?;
        for (position, description) in (1_usize..).zip(&self.descriptions) {
            writeln!(f, "  {position}. {description}")?;
        }
        writeln!(f, "---")?;
        writeln!(f, "Lowest estimated cost: {}", self.estimated_cost)?;
        writeln!(f, "Actual cost          : {}", self.actual_cost)
    }
}
