//! The simulation: immutable haul constants plus the mutable world state.
//!
//! Every mutator either succeeds and updates the state or fails with an
//! [`ActionError`] and leaves it untouched, so a [`Simulation`] is never in
//! an inconsistent state. Cloning is cheap for the constants, which are
//! shared, and deep for the world state.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::{Action, ActionError, ItemSet, SimulationConfig, SymmetricMatrix, Task, WorldState};

/// Construction-time failures. No simulation is produced when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The configuration names no locations.
    #[error("at least one location is required")]
    NoLocations,
    /// The distance store does not cover exactly the configured locations.
    #[error("distance table covers {order} locations but {locations} are configured")]
    DistanceOrderMismatch {
        /// Order of the distance store.
        order: usize,
        /// Number of configured locations.
        locations: usize,
    },
    /// The carrier start location does not exist.
    #[error("start location {location} is out of range ({locations} locations)")]
    StartLocationOutOfRange {
        /// Configured start location.
        location: usize,
        /// Number of locations.
        locations: usize,
    },
    /// A task references a location that does not exist.
    #[error("task for item {item} references location {location} ({locations} locations)")]
    TaskLocationOutOfRange {
        /// Item the task concerns.
        item: usize,
        /// Offending location.
        location: usize,
        /// Number of locations.
        locations: usize,
    },
    /// A task is keyed by an item that has no volume.
    #[error("task references item {item} but only {items} items are configured")]
    TaskItemOutOfRange {
        /// Offending item.
        item: usize,
        /// Number of items.
        items: usize,
    },
    /// An item has no task, so it has no starting location.
    #[error("item {item} has no task")]
    ItemWithoutTask {
        /// Item lacking a task.
        item: usize,
    },
}

/// Haul parameters fixed for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constants {
    capacity: u32,
    distances: SymmetricMatrix<u32>,
    volumes: Vec<u32>,
    location_names: Vec<String>,
}

impl Constants {
    /// Carrier capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Distance store.
    #[must_use]
    pub const fn distances(&self) -> &SymmetricMatrix<u32> {
        &self.distances
    }

    /// Volume of every item, indexed by item.
    #[must_use]
    pub fn volumes(&self) -> &[u32] {
        &self.volumes
    }

    /// Location names, indexed by location.
    #[must_use]
    pub fn location_names(&self) -> &[String] {
        &self.location_names
    }
}

/// Single-carrier pickup-and-delivery simulation.
///
/// # Examples
/// ```
/// use starhaul_core::{Action, Simulation};
/// use starhaul_core::test_support::single_delivery;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut simulation = Simulation::new(single_delivery())?;
/// for action in [Action::Take { item: 0 }, Action::Move { to: 1 }, Action::Put { item: 0 }] {
///     action.apply(&mut simulation)?;
/// }
/// assert!(simulation.is_terminal());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    constants: Arc<Constants>,
    state: WorldState,
}

impl Simulation {
    /// Validate `config` and place every item at its task's origin.
    ///
    /// Tasks whose origin is also their destination are already satisfied
    /// and are not kept.
    ///
    /// # Errors
    /// Returns a [`SimulationError`] when a location or item reference is out
    /// of range, an item has no task, or the distance store does not match
    /// the configured locations.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let SimulationConfig {
            capacity,
            start_location,
            location_names,
            distances,
            volumes,
            tasks,
        } = config;

        let locations = location_names.len();
        if locations == 0 {
            return Err(SimulationError::NoLocations);
        }
        if distances.order() != locations {
            return Err(SimulationError::DistanceOrderMismatch {
                order: distances.order(),
                locations,
            });
        }
        if start_location >= locations {
            return Err(SimulationError::StartLocationOutOfRange {
                location: start_location,
                locations,
            });
        }
        validate_tasks(&tasks, volumes.len(), locations)?;

        let mut location_items = vec![ItemSet::new(); locations];
        let mut outstanding = BTreeMap::new();
        for (&item, &task) in &tasks {
            if let Some(items) = location_items.get_mut(task.from) {
                items.insert(item);
            }
            if task.from == task.to {
                debug!("item {item} already rests at its destination {}", task.to);
            } else {
                outstanding.insert(item, task);
            }
        }

        Ok(Self {
            constants: Arc::new(Constants {
                capacity,
                distances,
                volumes,
                location_names,
            }),
            state: WorldState::new(start_location, ItemSet::new(), location_items, outstanding),
        })
    }

    /// Shared constants.
    #[must_use]
    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Current world state.
    #[must_use]
    pub const fn state(&self) -> &WorldState {
        &self.state
    }

    /// Deep copy of the current world state.
    #[must_use]
    pub fn snapshot(&self) -> WorldState {
        self.state.clone()
    }

    /// Replace the world state with one previously taken by
    /// [`snapshot`](Self::snapshot).
    pub fn restore(&mut self, state: WorldState) {
        self.state = state;
    }

    /// Number of locations.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.state.location_items().len()
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.constants.volumes.len()
    }

    /// Carrier capacity.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.constants.capacity
    }

    /// Location the carrier is at.
    #[must_use]
    pub const fn carrier_location(&self) -> usize {
        self.state.carrier_location()
    }

    /// Name of `location`, if it exists.
    #[must_use]
    pub fn location_name(&self, location: usize) -> Option<&str> {
        self.constants.location_names.get(location).map(String::as_str)
    }

    /// Volume of `item`, if it exists.
    #[must_use]
    pub fn volume(&self, item: usize) -> Option<u32> {
        self.constants.volumes.get(item).copied()
    }

    /// Distance between two locations.
    ///
    /// # Errors
    /// Returns [`ActionError::LocationOutOfRange`] for an unknown location.
    pub fn distance(&self, from: usize, to: usize) -> Result<u32, ActionError> {
        let locations = self.location_count();
        for location in [from, to] {
            if location >= locations {
                return Err(ActionError::LocationOutOfRange {
                    location,
                    locations,
                });
            }
        }
        self.constants
            .distances
            .at(from, to)
            .map_err(|_| ActionError::LocationOutOfRange {
                location: to,
                locations,
            })
    }

    /// Total volume currently held by the carrier.
    #[must_use]
    pub fn load(&self) -> u64 {
        self.state
            .carrier_items()
            .iter()
            .filter_map(|&item| self.volume(item))
            .map(u64::from)
            .sum()
    }

    /// Capacity left before the carrier is full.
    #[must_use]
    pub fn remaining_capacity(&self) -> u64 {
        u64::from(self.capacity()).saturating_sub(self.load())
    }

    /// `true` once every task is complete.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Send the carrier to `to`.
    ///
    /// # Errors
    /// Returns [`ActionError::LocationOutOfRange`] for an unknown location.
    pub fn move_carrier(&mut self, to: usize) -> Result<(), ActionError> {
        let locations = self.location_count();
        if to >= locations {
            return Err(ActionError::LocationOutOfRange {
                location: to,
                locations,
            });
        }
        self.state.set_carrier_location(to);
        Ok(())
    }

    /// Move `item` from the carrier's location into the carrier.
    ///
    /// # Errors
    /// Fails when the item does not exist, is not at the carrier's location,
    /// has already been delivered, or does not fit in the remaining capacity.
    pub fn take_item(&mut self, item: usize) -> Result<(), ActionError> {
        let volume = self.item_volume(item)?;
        let location = self.carrier_location();
        if !self
            .state
            .items_at(location)
            .is_some_and(|items| items.contains(&item))
        {
            return Err(ActionError::ItemNotAtLocation { item, location });
        }
        if !self.state.tasks().contains_key(&item) {
            return Err(ActionError::ItemDelivered { item });
        }
        let available = self.remaining_capacity();
        if volume > available {
            return Err(ActionError::CapacityExceeded {
                item,
                required: volume,
                available,
            });
        }

        if self.state.take_from_carrier_location(item) {
            self.state.carrier_items_mut().insert(item);
        }
        Ok(())
    }

    /// Drop a held `item` at the carrier's location, then complete any task
    /// satisfied there.
    ///
    /// # Errors
    /// Fails when the item does not exist or is not held by the carrier.
    pub fn put_item(&mut self, item: usize) -> Result<(), ActionError> {
        self.item_volume(item)?;
        if !self.state.carrier_items().contains(&item) {
            return Err(ActionError::ItemNotHeld { item });
        }

        let location = self.carrier_location();
        self.state.carrier_items_mut().remove(&item);
        if let Some(items) = self.state.items_at_mut(location) {
            items.insert(item);
        }
        self.complete_tasks_at_current_drop();
        Ok(())
    }

    /// Delete every outstanding task whose destination is the carrier's
    /// location and whose item rests there. Returns the number deleted.
    ///
    /// Called after every successful [`put_item`](Self::put_item); all tasks
    /// are scanned, not only the one for the item just dropped.
    pub fn complete_tasks_at_current_drop(&mut self) -> usize {
        let location = self.carrier_location();
        let Some(present) = self.state.items_at(location) else {
            return 0;
        };
        let completed: Vec<usize> = self
            .state
            .tasks()
            .iter()
            .filter(|(item, task)| task.to == location && present.contains(*item))
            .map(|(&item, _)| item)
            .collect();

        let tasks = self.state.tasks_mut();
        for item in &completed {
            tasks.remove(item);
        }
        completed.len()
    }

    /// Actions worth trying from the current state, in a fixed order.
    ///
    /// One move to every other location in index order, then one take for
    /// every undelivered item here that fits the remaining capacity, then one
    /// put for every held item. Search tie-breaking depends on this order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let here = self.carrier_location();
        let remaining = self.remaining_capacity();

        let moves = (0..self.location_count())
            .filter(|&to| to != here)
            .map(|to| Action::Move { to });
        let takes = self
            .state
            .items_at(here)
            .into_iter()
            .flatten()
            .copied()
            .filter(|item| self.state.tasks().contains_key(item))
            .filter(|&item| self.volume(item).is_some_and(|v| u64::from(v) <= remaining))
            .map(|item| Action::Take { item });
        let puts = self
            .state
            .carrier_items()
            .iter()
            .map(|&item| Action::Put { item });

        moves.chain(takes).chain(puts).collect()
    }

    fn item_volume(&self, item: usize) -> Result<u64, ActionError> {
        self.volume(item)
            .map(u64::from)
            .ok_or(ActionError::ItemOutOfRange {
                item,
                items: self.item_count(),
            })
    }
}

fn validate_tasks(
    tasks: &BTreeMap<usize, Task>,
    items: usize,
    locations: usize,
) -> Result<(), SimulationError> {
    for (&item, task) in tasks {
        if item >= items {
            return Err(SimulationError::TaskItemOutOfRange { item, items });
        }
        for location in [task.from, task.to] {
            if location >= locations {
                return Err(SimulationError::TaskLocationOutOfRange {
                    item,
                    location,
                    locations,
                });
            }
        }
    }
    if let Some(item) = (0..items).find(|item| !tasks.contains_key(item)) {
        return Err(SimulationError::ItemWithoutTask { item });
    }
    Ok(())
}
