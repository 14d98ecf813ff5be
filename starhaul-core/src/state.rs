//! World state snapshots and their canonical fingerprints.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of item indices.
///
/// Backed by a `BTreeSet`, so iteration is always in increasing index order.
pub type ItemSet = BTreeSet<usize>;

/// Outstanding obligation to carry one item from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    /// Location the item starts at.
    pub from: usize,
    /// Location the item must reach.
    pub to: usize,
}

impl Task {
    /// Construct a task.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Where an item currently rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Held by the carrier.
    Carrier,
    /// Resting at the given location.
    Location(usize),
}

/// Mutable snapshot of the world: carrier position, item placement and the
/// tasks still outstanding.
///
/// Cloning produces an independent deep copy. Equality compares the carrier
/// location, every item set and the task mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    carrier_location: usize,
    carrier_items: ItemSet,
    location_items: Vec<ItemSet>,
    tasks: BTreeMap<usize, Task>,
}

impl WorldState {
    /// Assemble a state from its parts.
    ///
    /// No invariants are checked here; [`Simulation`](crate::Simulation)
    /// construction is the validated entry point.
    #[must_use]
    pub const fn new(
        carrier_location: usize,
        carrier_items: ItemSet,
        location_items: Vec<ItemSet>,
        tasks: BTreeMap<usize, Task>,
    ) -> Self {
        Self {
            carrier_location,
            carrier_items,
            location_items,
            tasks,
        }
    }

    /// Location the carrier is at.
    #[must_use]
    pub const fn carrier_location(&self) -> usize {
        self.carrier_location
    }

    /// Items held by the carrier.
    #[must_use]
    pub const fn carrier_items(&self) -> &ItemSet {
        &self.carrier_items
    }

    /// Items resting at each location, indexed by location.
    #[must_use]
    pub fn location_items(&self) -> &[ItemSet] {
        &self.location_items
    }

    /// Items resting at `location`, or `None` for an unknown location.
    #[must_use]
    pub fn items_at(&self, location: usize) -> Option<&ItemSet> {
        self.location_items.get(location)
    }

    /// Outstanding tasks keyed by item.
    #[must_use]
    pub const fn tasks(&self) -> &BTreeMap<usize, Task> {
        &self.tasks
    }

    /// `true` once no tasks remain.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.tasks.is_empty()
    }

    /// First place `item` is found, carrier before locations.
    #[must_use]
    pub fn placement(&self, item: usize) -> Option<Placement> {
        if self.carrier_items.contains(&item) {
            return Some(Placement::Carrier);
        }
        self.location_items
            .iter()
            .position(|items| items.contains(&item))
            .map(Placement::Location)
    }

    /// Number of sets (carrier and locations) that contain `item`.
    ///
    /// Any state produced by a [`Simulation`](crate::Simulation) reports
    /// exactly one for every item.
    #[must_use]
    pub fn occurrences(&self, item: usize) -> usize {
        let held = usize::from(self.carrier_items.contains(&item));
        held + self
            .location_items
            .iter()
            .filter(|items| items.contains(&item))
            .count()
    }

    /// Canonical key for this state.
    ///
    /// Encodes the carrier location, the held items and the items at each
    /// location in index order. Tasks are not part of the key: they follow
    /// from item placement.
    ///
    /// # Examples
    /// ```
    /// use std::collections::{BTreeMap, BTreeSet};
    /// use starhaul_core::WorldState;
    ///
    /// let state = WorldState::new(
    ///     1,
    ///     BTreeSet::from([2]),
    ///     vec![BTreeSet::from([1, 0]), BTreeSet::new()],
    ///     BTreeMap::new(),
    /// );
    /// assert_eq!(state.fingerprint().as_str(), "1|[2]|[0 1];[];");
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut key = self.carrier_location.to_string();
        key.push('|');
        write_set(&mut key, &self.carrier_items);
        key.push('|');
        for items in &self.location_items {
            write_set(&mut key, items);
            key.push(';');
        }
        Fingerprint(key)
    }

    pub(crate) const fn set_carrier_location(&mut self, location: usize) {
        self.carrier_location = location;
    }

    pub(crate) const fn carrier_items_mut(&mut self) -> &mut ItemSet {
        &mut self.carrier_items
    }

    pub(crate) fn items_at_mut(&mut self, location: usize) -> Option<&mut ItemSet> {
        self.location_items.get_mut(location)
    }

    pub(crate) fn take_from_carrier_location(&mut self, item: usize) -> bool {
        self.location_items
            .get_mut(self.carrier_location)
            .is_some_and(|items| items.remove(&item))
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut BTreeMap<usize, Task> {
        &mut self.tasks
    }
}

fn write_set(key: &mut String, items: &ItemSet) {
    key.push('[');
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            key.push(' ');
        }
        key.push_str(&item.to_string());
    }
    key.push(']');
}

/// Canonical string form of a [`WorldState`], used as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Borrow the encoded key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
