//! Ready-made configurations shared by unit, behaviour and benchmark code.
//!
//! Available to this crate's tests and, through the `test-support` feature,
//! to other crates in the workspace.

use std::collections::BTreeMap;

use log::warn;

use crate::{SimulationConfig, SymmetricMatrix, Task};

/// Incremental builder for small [`SimulationConfig`]s.
///
/// Locations are named `location-0`, `location-1`, ... unless renamed.
/// Items are numbered in the order they are added.
///
/// # Examples
/// ```
/// use starhaul_core::test_support::ConfigBuilder;
///
/// let config = ConfigBuilder::new(3)
///     .capacity(2)
///     .distance(0, 2, 4)
///     .item(1, 0, 2)
///     .build();
/// assert_eq!(config.distances.at(2, 0), Ok(4));
/// assert_eq!(config.volumes, vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    capacity: u32,
    start_location: usize,
    location_names: Vec<String>,
    distances: Vec<(usize, usize, u32)>,
    volumes: Vec<u32>,
    tasks: BTreeMap<usize, Task>,
}

impl ConfigBuilder {
    /// Start a configuration with `locations` locations, capacity 10 and the
    /// carrier at location 0.
    #[must_use]
    pub fn new(locations: usize) -> Self {
        Self {
            capacity: 10,
            start_location: 0,
            location_names: (0..locations).map(|i| format!("location-{i}")).collect(),
            distances: Vec::new(),
            volumes: Vec::new(),
            tasks: BTreeMap::new(),
        }
    }

    /// Replace the location names.
    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the carrier capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the carrier start location.
    #[must_use]
    pub const fn start(mut self, location: usize) -> Self {
        self.start_location = location;
        self
    }

    /// Record the distance between `a` and `b`.
    #[must_use]
    pub fn distance(mut self, a: usize, b: usize, distance: u32) -> Self {
        self.distances.push((a, b, distance));
        self
    }

    /// Add an item of `volume` that must travel from `from` to `to`.
    #[must_use]
    pub fn item(mut self, volume: u32, from: usize, to: usize) -> Self {
        self.tasks.insert(self.volumes.len(), Task::new(from, to));
        self.volumes.push(volume);
        self
    }

    /// Finish the configuration. Distances naming unknown locations are
    /// skipped with a warning.
    #[must_use]
    pub fn build(self) -> SimulationConfig {
        let mut distances = SymmetricMatrix::with_order(self.location_names.len());
        for (a, b, distance) in self.distances {
            if let Err(err) = distances.set(a, b, distance) {
                warn!("skipping distance {a}-{b}: {err}");
            }
        }
        SimulationConfig {
            capacity: self.capacity,
            start_location: self.start_location,
            location_names: self.location_names,
            distances,
            volumes: self.volumes,
            tasks: self.tasks,
        }
    }
}

/// Two locations five apart; one item of volume 1 from `depot` to `market`.
/// Capacity 1, carrier at `depot`. The optimal plan costs 9.
#[must_use]
pub fn single_delivery() -> SimulationConfig {
    ConfigBuilder::new(2)
        .names(["depot", "market"])
        .capacity(1)
        .distance(0, 1, 5)
        .item(1, 0, 1)
        .build()
}

/// Three locations where the direct leg 0-2 (5) is longer than the detour
/// through 1 (1 + 1). One item from 0 to 2, carrier starting at 1.
/// The optimal plan costs 11.
#[must_use]
pub fn detour_delivery() -> SimulationConfig {
    ConfigBuilder::new(3)
        .names(["quarry", "junction", "works"])
        .capacity(1)
        .start(1)
        .distance(0, 1, 1)
        .distance(1, 2, 1)
        .distance(0, 2, 5)
        .item(1, 0, 2)
        .build()
}

/// Two items of volume 2 that share a route from location 0 to location 1,
/// five apart, with the given carrier capacity.
///
/// With capacity 4 both fit in one trip (cost 11); with capacity 2 or 3 the
/// carrier must return for the second (cost 25).
#[must_use]
pub fn shared_load(capacity: u32) -> SimulationConfig {
    ConfigBuilder::new(2)
        .capacity(capacity)
        .distance(0, 1, 5)
        .item(2, 0, 1)
        .item(2, 0, 1)
        .build()
}

/// One item larger than the carrier: no plan exists.
#[must_use]
pub fn oversized_delivery() -> SimulationConfig {
    ConfigBuilder::new(2)
        .capacity(1)
        .distance(0, 1, 3)
        .item(2, 0, 1)
        .build()
}
