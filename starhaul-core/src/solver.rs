//! Solver boundary: plans, responses and the [`Solver`] trait.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Action, ActionError, STEP_PENALTY, Simulation};

/// An ordered list of actions together with the cost the solver assigned it.
///
/// The cost of a plan is the sum, over its actions, of each action's
/// incremental cost plus [`STEP_PENALTY`].
///
/// # Examples
/// ```
/// use starhaul_core::{Action, Plan};
///
/// let plan = Plan::new(vec![Action::Take { item: 0 }], 1);
/// assert_eq!(plan.len(), 1);
/// assert!(!plan.is_empty());
/// assert!(Plan::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    /// Actions to take, in order.
    pub actions: Vec<Action>,
    /// Estimated total cost.
    pub cost: u64,
}

/// Outcome of replaying a [`Plan`] against a fresh simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    /// Cost accumulated while applying every action.
    pub cost: u64,
    /// Whether every task was complete after the last action.
    pub completed: bool,
}

impl Plan {
    /// Construct a plan.
    #[must_use]
    pub const fn new(actions: Vec<Action>, cost: u64) -> Self {
        Self { actions, cost }
    }

    /// A plan with no actions and zero cost.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// `true` when there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Human-readable description of every action, in order.
    #[must_use]
    pub fn descriptions(&self) -> Vec<String> {
        self.actions.iter().map(Action::description).collect()
    }

    /// Apply every action to a clone of `simulation`, summing each
    /// incremental cost plus [`STEP_PENALTY`].
    ///
    /// `simulation` itself is not modified.
    ///
    /// # Errors
    /// Returns the first [`ActionError`] met; the plan is not legal from the
    /// given state.
    pub fn replay(&self, simulation: &Simulation) -> Result<Replay, ActionError> {
        let mut fresh = simulation.clone();
        let mut cost: u64 = 0;
        for action in &self.actions {
            let step = action.apply(&mut fresh)?;
            cost = cost.saturating_add(step).saturating_add(STEP_PENALTY);
        }
        Ok(Replay {
            cost,
            completed: fresh.is_terminal(),
        })
    }

    /// `true` when the plan replays legally and leaves no task outstanding.
    #[must_use]
    pub fn replay_completes(&self, simulation: &Simulation) -> bool {
        self.replay(simulation).is_ok_and(|replay| replay.completed)
    }
}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Distinct states whose actions were explored.
    pub states_expanded: u64,
    /// Lookups answered from the memo.
    pub memo_hits: u64,
    /// Branches cut because they revisited a state on the current path.
    pub cycle_prunes: u64,
    /// Candidate actions that failed to apply.
    pub infeasible_actions: u64,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResponse {
    /// The cheapest plan found.
    pub plan: Plan,
    /// Counters describing the search.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No finite-cost plan clears every task from the given state.
    #[error("no plan completes every task")]
    Unreachable,
}

/// Find the cheapest plan that completes every task.
///
/// Solvers must be `Send + Sync`. Implementations report an impossible
/// instance through [`SolveError`] rather than panicking.
pub trait Solver: Send + Sync {
    /// Solve from the simulation's current state.
    ///
    /// # Errors
    /// Returns [`SolveError::Unreachable`] when no plan exists.
    fn solve(&self, simulation: &Simulation) -> Result<SolveResponse, SolveError>;
}
