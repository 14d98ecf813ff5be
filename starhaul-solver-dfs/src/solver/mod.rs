//! `DfsSolver`: the [`Solver`] backed by [`Search`].

use std::time::Instant;

use log::{debug, warn};
use starhaul_core::{Diagnostics, Simulation, SolveError, SolveResponse, Solver};

use crate::Search;

/// Solver that exhaustively searches the reachable state graph.
///
/// Stateless between calls: every [`solve`](Solver::solve) builds its own
/// [`Search`], so repeated or concurrent solves never share caches.
///
/// # Examples
/// ```
/// use starhaul_core::{Simulation, Solver};
/// use starhaul_core::test_support::detour_delivery;
/// use starhaul_solver_dfs::DfsSolver;
///
/// let simulation = Simulation::new(detour_delivery()).expect("valid config");
/// let response = DfsSolver::new().solve(&simulation).expect("solvable");
/// assert_eq!(response.plan.cost, 11);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsSolver;

impl DfsSolver {
    /// Construct a solver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Solver for DfsSolver {
    fn solve(&self, simulation: &Simulation) -> Result<SolveResponse, SolveError> {
        let started_at = Instant::now();
        debug!(
            "dfs solve: {} locations, {} items, {} outstanding tasks",
            simulation.location_count(),
            simulation.item_count(),
            simulation.state().tasks().len()
        );

        let mut search = Search::new();
        let best = search.best_plan(simulation);
        let stats = search.stats();
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            states_expanded: stats.states_expanded,
            memo_hits: stats.memo_hits,
            cycle_prunes: stats.cycle_prunes,
            infeasible_actions: stats.infeasible_actions,
        };

        let Some(plan) = best else {
            warn!(
                "no plan completes every task ({} states expanded)",
                diagnostics.states_expanded
            );
            return Err(SolveError::Unreachable);
        };
        debug!(
            "dfs solve finished: cost {}, {} actions, {} states, {} memo hits, {} cycle prunes in {:?}",
            plan.cost,
            plan.len(),
            diagnostics.states_expanded,
            diagnostics.memo_hits,
            diagnostics.cycle_prunes,
            diagnostics.solve_time
        );
        Ok(SolveResponse { plan, diagnostics })
    }
}
