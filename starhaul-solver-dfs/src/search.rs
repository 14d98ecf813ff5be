//! Exhaustive depth-first search with memoization and cycle pruning.
//!
//! The memo maps a state fingerprint to the cheapest remaining plan from that
//! state, or `None` when no finite plan was found. The visited set only holds
//! the fingerprints on the current search path: a fingerprint is inserted
//! when its state is opened and removed when the state is closed, so the same
//! state may be reached again along a different path.
//!
//! The path lives in an explicit stack of [`Frame`]s on the heap rather than
//! on the call stack, so deep paths cannot overflow the thread stack. Each
//! candidate action is applied to its own clone of the simulation, so sibling
//! actions always start from the same state and nothing needs to be restored
//! after a branch is explored.

use std::collections::{HashMap, HashSet};
use std::vec;

use starhaul_core::{Action, Fingerprint, Plan, STEP_PENALTY, Simulation};

/// Counters gathered during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose legal actions were explored.
    pub states_expanded: u64,
    /// Lookups answered from the memo.
    pub memo_hits: u64,
    /// Branches cut because their state was already on the current path.
    pub cycle_prunes: u64,
    /// Candidate actions that failed to apply.
    pub infeasible_actions: u64,
}

/// One search run: owns its memo and visited set.
///
/// # Examples
/// ```
/// use starhaul_core::Simulation;
/// use starhaul_core::test_support::single_delivery;
/// use starhaul_solver_dfs::Search;
///
/// # fn main() -> Result<(), starhaul_core::SimulationError> {
/// let simulation = Simulation::new(single_delivery())?;
/// let mut search = Search::new();
/// let plan = search.best_plan(&simulation).expect("a plan exists");
/// assert_eq!(plan.cost, 9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Search {
    memo: HashMap<Fingerprint, Option<Plan>>,
    visited: HashSet<Fingerprint>,
    stats: SearchStats,
}

/// A state opened on the current path, part-way through its legal actions.
#[derive(Debug)]
struct Frame {
    simulation: Simulation,
    fingerprint: Fingerprint,
    actions: vec::IntoIter<Action>,
    /// Action whose successor is being searched, with its incremental cost.
    pending: Option<(Action, u64)>,
    best: Option<Plan>,
}

impl Frame {
    fn new(simulation: Simulation, fingerprint: Fingerprint) -> Self {
        let actions = simulation.legal_actions().into_iter();
        Self {
            simulation,
            fingerprint,
            actions,
            pending: None,
            best: None,
        }
    }

    /// Apply the next action that succeeds and return the resulting state.
    fn next_successor(&mut self, stats: &mut SearchStats) -> Option<Simulation> {
        for action in self.actions.by_ref() {
            let mut next = self.simulation.clone();
            match action.apply(&mut next) {
                Ok(step) => {
                    self.pending = Some((action, step));
                    return Some(next);
                }
                Err(_) => stats.infeasible_actions += 1,
            }
        }
        None
    }

    /// Fold the best plan from the pending action's successor into this
    /// frame's best. Ties keep the earlier action.
    fn absorb(&mut self, rest: Option<Plan>) {
        let (Some((action, step)), Some(tail)) = (self.pending.take(), rest) else {
            return;
        };
        let total = step.saturating_add(tail.cost).saturating_add(STEP_PENALTY);
        if self.best.as_ref().is_none_or(|plan| total < plan.cost) {
            let mut actions = Vec::with_capacity(tail.len() + 1);
            actions.push(action);
            actions.extend(tail.actions);
            self.best = Some(Plan::new(actions, total));
        }
    }
}

/// Outcome of reaching a state.
enum Visit {
    /// Answered without exploring: terminal, memoized or on the current path.
    Resolved(Option<Plan>),
    /// Newly opened; its actions still need exploring.
    Opened(Frame),
}

impl Search {
    /// Start a search with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of memoized states.
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Cheapest plan that completes every task from the simulation's current
    /// state, or `None` when none was found.
    ///
    /// Ties keep the first plan found in legal-action order.
    pub fn best_plan(&mut self, simulation: &Simulation) -> Option<Plan> {
        let mut path = match self.visit(simulation.clone()) {
            Visit::Resolved(plan) => return plan,
            Visit::Opened(frame) => vec![frame],
        };
        let mut returned: Option<Option<Plan>> = None;

        while let Some(frame) = path.last_mut() {
            if let Some(rest) = returned.take() {
                frame.absorb(rest);
            }
            if let Some(successor) = frame.next_successor(&mut self.stats) {
                match self.visit(successor) {
                    Visit::Resolved(rest) => returned = Some(rest),
                    Visit::Opened(child) => path.push(child),
                }
            } else if let Some(done) = path.pop() {
                returned = Some(self.close(done));
            }
        }
        returned.flatten()
    }

    fn visit(&mut self, simulation: Simulation) -> Visit {
        if simulation.is_terminal() {
            return Visit::Resolved(Some(Plan::empty()));
        }

        let fingerprint = simulation.state().fingerprint();
        if let Some(cached) = self.memo.get(&fingerprint) {
            self.stats.memo_hits += 1;
            return Visit::Resolved(cached.clone());
        }
        if self.visited.contains(&fingerprint) {
            self.stats.cycle_prunes += 1;
            return Visit::Resolved(None);
        }

        self.visited.insert(fingerprint.clone());
        self.stats.states_expanded += 1;
        Visit::Opened(Frame::new(simulation, fingerprint))
    }

    fn close(&mut self, frame: Frame) -> Option<Plan> {
        let Frame {
            fingerprint, best, ..
        } = frame;
        self.visited.remove(&fingerprint);
        // Results shaped by a cycle prune are cached too.
        self.memo.insert(fingerprint, best.clone());
        best
    }
}
