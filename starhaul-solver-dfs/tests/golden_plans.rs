#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden plan regression tests for the DFS solver.
//!
//! Each case loads an input document from JSON, solves it and checks the
//! exact action sequence and cost. Tie-breaking is part of the expectation.


use golden_plans_support::{build_simulation, load_golden_plan};
use rstest::rstest;
use starhaul_core::Solver;
use starhaul_solver_dfs::DfsSolver;

#[rstest]
#[case("single_delivery.json")]
#[case("detour.json")]
#[case("shared_trip.json")]
#[case("split_trips.json")]
#[case("crossing_deliveries.json")]
fn golden_plans_match(#[case] filename: &str) {
    let golden = load_golden_plan(filename);
    let simulation = build_simulation(&golden);

    let response = DfsSolver::new()
        .solve(&simulation)
        .expect("golden instances are solvable");

    assert_eq!(
        response.plan.actions, golden.expected.actions,
        "{}: unexpected actions",
        golden.name
    );
    assert_eq!(
        response.plan.cost, golden.expected.cost,
        "{}: unexpected cost",
        golden.name
    );

    let replay = response
        .plan
        .replay(&simulation)
        .expect("golden plans replay legally");
    assert!(replay.completed, "{}: replay left tasks", golden.name);
    assert_eq!(replay.cost, golden.expected.cost);
}
