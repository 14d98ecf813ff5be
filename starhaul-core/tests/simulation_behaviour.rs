//! Behavioural tests for `Simulation` mutators using rstest-bdd.

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use starhaul_core::test_support::{shared_load, single_delivery};
use starhaul_core::{Action, ActionError, Simulation, SimulationConfig};

#[derive(Debug, Default)]
struct SimulationWorld {
    simulation: RefCell<Option<Simulation>>,
    cost: Cell<u64>,
    last_error: RefCell<Option<ActionError>>,
}

impl SimulationWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn load(&self, config: SimulationConfig) {
        let simulation = Simulation::new(config).expect("fixture config is valid");
        self.simulation.replace(Some(simulation));
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn apply(&self, action: Action) {
        let mut slot = self.simulation.borrow_mut();
        let simulation = slot.as_mut().expect("a simulation should be loaded");
        match action.apply(simulation) {
            Ok(cost) => {
                self.cost.set(self.cost.get() + cost);
                self.last_error.replace(None);
            }
            Err(err) => {
                self.last_error.replace(Some(err));
            }
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn with_simulation<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        let slot = self.simulation.borrow();
        f(slot.as_ref().expect("a simulation should be loaded"))
    }
}

#[fixture]
fn world() -> SimulationWorld {
    SimulationWorld::default()
}

#[given("a depot and market five apart with one parcel at the depot")]
fn given_single_delivery(world: &SimulationWorld) {
    world.load(single_delivery());
}

#[given("two bulky items sharing a route with capacity {capacity}")]
fn given_shared_load(world: &SimulationWorld, capacity: u32) {
    world.load(shared_load(capacity));
}

#[when("the carrier takes item {item}")]
fn when_take(world: &SimulationWorld, item: usize) {
    world.apply(Action::Take { item });
}

#[when("the carrier moves to location {to}")]
fn when_move(world: &SimulationWorld, to: usize) {
    world.apply(Action::Move { to });
}

#[when("the carrier puts item {item}")]
fn when_put(world: &SimulationWorld, item: usize) {
    world.apply(Action::Put { item });
}

#[then("no tasks remain")]
fn then_terminal(world: &SimulationWorld) {
    assert!(world.with_simulation(Simulation::is_terminal));
}

#[then("the remaining task count is {count}")]
fn then_tasks_remain(world: &SimulationWorld, count: usize) {
    let remaining = world.with_simulation(|simulation| simulation.state().tasks().len());
    assert_eq!(remaining, count);
}

#[then("the applied actions cost {cost}")]
fn then_cost(world: &SimulationWorld, cost: u64) {
    assert_eq!(world.cost.get(), cost);
}

#[then("the last action failed because the carrier is full")]
fn then_capacity_error(world: &SimulationWorld) {
    assert!(matches!(
        *world.last_error.borrow(),
        Some(ActionError::CapacityExceeded { .. })
    ));
}

#[then("the last action failed because the item was delivered")]
fn then_delivered_error(world: &SimulationWorld) {
    assert!(matches!(
        *world.last_error.borrow(),
        Some(ActionError::ItemDelivered { .. })
    ));
}

#[then("the carrier holds {count} items")]
fn then_holds(world: &SimulationWorld, count: usize) {
    let held = world.with_simulation(|simulation| simulation.state().carrier_items().len());
    assert_eq!(held, count);
}

#[then("the legal actions are \"{actions}\"")]
fn then_legal_actions(world: &SimulationWorld, actions: String) {
    let listed = world.with_simulation(|simulation| {
        simulation
            .legal_actions()
            .iter()
            .map(Action::description)
            .collect::<Vec<_>>()
            .join("; ")
    });
    assert_eq!(listed, actions);
}

#[scenario(path = "tests/features/simulation.feature", index = 0)]
fn delivering_completes_task(world: SimulationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/simulation.feature", index = 1)]
fn capacity_is_enforced(world: SimulationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/simulation.feature", index = 2)]
fn legal_action_order(world: SimulationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/simulation.feature", index = 3)]
fn short_drop_keeps_task(world: SimulationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/simulation.feature", index = 4)]
fn delivered_items_are_retired(world: SimulationWorld) {
    let _ = world;
}
