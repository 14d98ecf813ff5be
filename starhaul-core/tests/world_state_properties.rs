//! Property-based tests for the simulation model.
//!
//! # Invariants tested
//!
//! - **Conservation:** every item rests in exactly one place at all times.
//! - **Capacity:** the carrier load never exceeds its capacity.
//! - **Task completion:** a task is gone iff its item rests at its destination.
//! - **Failed actions:** an action that fails leaves the state untouched.
//! - **Fingerprints:** states sharing a fingerprint share their tasks.
//! - **Matrix symmetry:** `index(i, j) == index(j, i)` and `set`/`at` agree.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use starhaul_core::test_support::ConfigBuilder;
use starhaul_core::{
    Action, Fingerprint, Placement, Simulation, SimulationConfig, SymmetricMatrix, Task,
};

/// A step of a random walk: either the n-th legal action or an arbitrary one.
#[derive(Debug, Clone, Copy)]
enum Step {
    Legal(prop::sample::Index),
    Raw(Action),
}

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (2_usize..=4).prop_flat_map(|locations| {
        (
            1_u32..=5,
            0..locations,
            proptest::collection::vec(0_u32..10, 6),
            proptest::collection::vec((1_u32..=3, 0..locations, 0..locations), 1..=3),
        )
            .prop_map(move |(capacity, start, lengths, items)| {
                let mut builder = ConfigBuilder::new(locations).capacity(capacity).start(start);
                let pairs = (0..locations)
                    .flat_map(|a| (a + 1..locations).map(move |b| (a, b)))
                    .zip(lengths);
                for ((a, b), length) in pairs {
                    builder = builder.distance(a, b, length);
                }
                for (volume, from, to) in items {
                    builder = builder.item(volume, from, to);
                }
                builder.build()
            })
    })
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0_usize..6).prop_map(|to| Action::Move { to }),
        (0_usize..5).prop_map(|item| Action::Take { item }),
        (0_usize..5).prop_map(|item| Action::Put { item }),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<prop::sample::Index>().prop_map(Step::Legal),
        1 => action_strategy().prop_map(Step::Raw),
    ]
}

fn pick(simulation: &Simulation, step: Step) -> Option<Action> {
    match step {
        Step::Raw(action) => Some(action),
        Step::Legal(index) => {
            let actions = simulation.legal_actions();
            if actions.is_empty() {
                return None;
            }
            actions.get(index.index(actions.len())).copied()
        }
    }
}

fn check_invariants(
    simulation: &Simulation,
    initial_tasks: &BTreeMap<usize, Task>,
) -> Result<(), TestCaseError> {
    let state = simulation.state();
    for item in 0..simulation.item_count() {
        prop_assert_eq!(state.occurrences(item), 1, "item {} misplaced", item);
    }
    prop_assert!(simulation.load() <= u64::from(simulation.capacity()));
    for (item, task) in initial_tasks {
        let delivered = state.placement(*item) == Some(Placement::Location(task.to));
        prop_assert_eq!(
            state.tasks().contains_key(item),
            !delivered,
            "task for item {} disagrees with its placement",
            item
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: random walks preserve every state invariant, failed actions
    /// change nothing and equal fingerprints imply equal tasks.
    #[test]
    fn random_walks_preserve_invariants(
        config in config_strategy(),
        steps in proptest::collection::vec(step_strategy(), 0..40),
    ) {
        let initial_tasks = config.tasks.clone();
        let mut simulation = Simulation::new(config).expect("generated config is valid");
        let mut seen: HashMap<Fingerprint, BTreeMap<usize, Task>> = HashMap::new();
        check_invariants(&simulation, &initial_tasks)?;

        for step in steps {
            let Some(action) = pick(&simulation, step) else {
                break;
            };
            let before = simulation.snapshot();
            if action.apply(&mut simulation).is_err() {
                prop_assert_eq!(simulation.state(), &before);
            }
            check_invariants(&simulation, &initial_tasks)?;

            let tasks = simulation.state().tasks().clone();
            let known = seen
                .entry(simulation.state().fingerprint())
                .or_insert_with(|| tasks.clone());
            prop_assert_eq!(&*known, &tasks);
        }
    }

    /// Property: legal actions always apply successfully.
    #[test]
    fn legal_actions_always_apply(config in config_strategy()) {
        let simulation = Simulation::new(config).expect("generated config is valid");
        for action in simulation.legal_actions() {
            let mut copy = simulation.clone();
            prop_assert!(action.apply(&mut copy).is_ok(), "{} failed", action);
        }
    }

    /// Property: the packed index is symmetric and `set` is visible from
    /// both directions.
    #[test]
    fn matrix_is_symmetric(
        (order, row, col) in (1_usize..12).prop_flat_map(|n| (Just(n), 0..n, 0..n)),
        value in any::<u32>(),
    ) {
        let mut matrix = SymmetricMatrix::<u32>::with_order(order);
        prop_assert_eq!(matrix.index(row, col), matrix.index(col, row));
        matrix.set(row, col, value).expect("indices are in range");
        prop_assert_eq!(matrix.at(col, row), Ok(value));
        prop_assert_eq!(SymmetricMatrix::from_data(matrix.as_slice().to_vec()), Ok(matrix));
    }
}
