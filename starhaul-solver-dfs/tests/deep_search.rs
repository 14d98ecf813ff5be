#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Regression tests for searches whose paths run far deeper than the thread
//! stack could hold as recursive calls.

use std::thread;

use rstest::rstest;
use starhaul_core::{Simulation, Solver};
use starhaul_solver_dfs::DfsSolver;

#[path = "../benches/bench_support.rs"]
mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_instance};

/// Stack far smaller than the main thread's, so any per-state recursion
/// would overflow long before the search ends.
const SMALL_STACK: usize = 256 * 1024;

#[rstest]
#[case::five_by_five(5, 5)]
#[case::six_by_five(6, 5)]
fn generated_instances_solve_on_a_small_stack(#[case] locations: usize, #[case] items: usize) {
    let simulation = Simulation::new(generate_instance(locations, items, BENCHMARK_SEED))
        .expect("generated config is valid");

    let solver_input = simulation.clone();
    let response = thread::Builder::new()
        .stack_size(SMALL_STACK)
        .spawn(move || DfsSolver::new().solve(&solver_input))
        .expect("spawn search thread")
        .join()
        .expect("search thread does not abort")
        .expect("generated instances are solvable");

    let replay = response
        .plan
        .replay(&simulation)
        .expect("returned plan replays legally");
    assert!(replay.completed);
    assert_eq!(replay.cost, response.plan.cost);
    assert!(response.diagnostics.states_expanded > 1_000);
}
