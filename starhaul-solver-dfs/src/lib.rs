//! Exhaustive depth-first solver for starhaul.
//!
//! [`DfsSolver`] implements [`Solver`](starhaul_core::Solver) by running a
//! fresh [`Search`] per request. The search explores every legal action from
//! every reachable state, memoizing the cheapest remaining plan by state
//! fingerprint and pruning branches that revisit a state already on the
//! current path. The result is the optimal plan under the step-penalised cost
//! model, with ties broken by legal-action order.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod search;
mod solver;

pub use search::{Search, SearchStats};
pub use solver::DfsSolver;
