//! Primitive carrier actions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Simulation;

/// Fixed overhead added to every move on top of the travelled distance.
pub const MOVE_OVERHEAD: u64 = 1;

/// Flat cost charged for every action in a plan, whatever its kind.
///
/// Among plans of equal travel distance this favours the one with fewer
/// actions.
pub const STEP_PENALTY: u64 = 1;

/// Reasons an action cannot be applied to the current state.
///
/// Searches treat any of these as an infeasible branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The target location does not exist.
    #[error("location {location} is out of range ({locations} locations)")]
    LocationOutOfRange {
        /// Requested location.
        location: usize,
        /// Number of locations.
        locations: usize,
    },
    /// The item does not exist.
    #[error("item {item} is out of range ({items} items)")]
    ItemOutOfRange {
        /// Requested item.
        item: usize,
        /// Number of items.
        items: usize,
    },
    /// The item is not at the carrier's location.
    #[error("item {item} is not at location {location}")]
    ItemNotAtLocation {
        /// Requested item.
        item: usize,
        /// Carrier location.
        location: usize,
    },
    /// The carrier does not hold the item.
    #[error("item {item} is not held by the carrier")]
    ItemNotHeld {
        /// Requested item.
        item: usize,
    },
    /// The item has already reached its destination.
    #[error("item {item} has already been delivered")]
    ItemDelivered {
        /// Requested item.
        item: usize,
    },
    /// Taking the item would exceed the carrier capacity.
    #[error("taking item {item} needs {required} capacity but only {available} remains")]
    CapacityExceeded {
        /// Requested item.
        item: usize,
        /// Volume of the item.
        required: u64,
        /// Capacity left before the take.
        available: u64,
    },
}

/// A single step the carrier can take.
///
/// # Examples
/// ```
/// use starhaul_core::Action;
///
/// assert_eq!(Action::Move { to: 2 }.to_string(), "move to location 2");
/// assert_eq!(Action::Take { item: 0 }.description(), "take item 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Action {
    /// Travel to another location.
    Move {
        /// Destination location.
        to: usize,
    },
    /// Pick up an item at the carrier's location.
    Take {
        /// Item to pick up.
        item: usize,
    },
    /// Drop a held item at the carrier's location.
    Put {
        /// Item to drop.
        item: usize,
    },
}

impl Action {
    /// Apply the action, returning its incremental cost.
    ///
    /// Moves cost the travelled distance plus [`MOVE_OVERHEAD`]; takes and
    /// puts cost nothing. On error the simulation is left untouched.
    ///
    /// # Errors
    /// Returns the [`ActionError`] describing why the action is illegal in
    /// the current state.
    pub fn apply(&self, simulation: &mut Simulation) -> Result<u64, ActionError> {
        match *self {
            Self::Move { to } => {
                let distance = simulation.distance(simulation.carrier_location(), to)?;
                simulation.move_carrier(to)?;
                Ok(u64::from(distance).saturating_add(MOVE_OVERHEAD))
            }
            Self::Take { item } => simulation.take_item(item).map(|()| 0),
            Self::Put { item } => simulation.put_item(item).map(|()| 0),
        }
    }

    /// Human-readable description used in reports.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { to } => write!(f, "move to location {to}"),
            Self::Take { item } => write!(f, "take item {item}"),
            Self::Put { item } => write!(f, "put item {item}"),
        }
    }
}
