//! Simulation configuration and the document it is decoded from.
//!
//! [`HaulDocument`] mirrors the on-disk JSON layout, where locations are
//! referenced by name. Converting it into a [`SimulationConfig`] resolves
//! names to dense indices, fills the distance store and numbers the items.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SimulationError, SymmetricMatrix, Task};

/// Validated inputs for [`Simulation::new`](crate::Simulation::new).
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use starhaul_core::{Simulation, SimulationConfig, SymmetricMatrix, Task};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut distances = SymmetricMatrix::with_order(2);
/// distances.set(0, 1, 5)?;
/// let config = SimulationConfig {
///     capacity: 1,
///     start_location: 0,
///     location_names: vec!["depot".into(), "market".into()],
///     distances,
///     volumes: vec![1],
///     tasks: BTreeMap::from([(0, Task::new(0, 1))]),
/// };
/// let simulation = Simulation::new(config)?;
/// assert_eq!(simulation.location_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Maximum total volume the carrier may hold.
    pub capacity: u32,
    /// Location the carrier starts at.
    pub start_location: usize,
    /// Human-readable name of each location, indexed by location.
    pub location_names: Vec<String>,
    /// Pairwise travel distances between locations.
    pub distances: SymmetricMatrix<u32>,
    /// Volume of each item, indexed by item.
    pub volumes: Vec<u32>,
    /// Pickup and delivery obligation for each item.
    pub tasks: BTreeMap<usize, Task>,
}

/// Errors raised while resolving a [`HaulDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The document lists no locations.
    #[error("at least one location is required")]
    NoLocations,
    /// A location name appears more than once.
    #[error("location {name:?} is listed more than once")]
    DuplicateLocation {
        /// Repeated name.
        name: String,
    },
    /// A field referenced a location that is not listed.
    #[error("{field} references unknown location {name:?}")]
    UnknownLocation {
        /// Document field holding the reference.
        field: &'static str,
        /// Unresolved name.
        name: String,
    },
    /// The same pair of locations was given two different distances.
    #[error("distance between {from:?} and {to:?} is given as both {first} and {second}")]
    AsymmetricDistance {
        /// One end of the pair.
        from: String,
        /// Other end of the pair.
        to: String,
        /// Value seen first.
        first: u32,
        /// Conflicting value.
        second: u32,
    },
    /// The resolved configuration was rejected by the simulation.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Haul description as written in an input file.
///
/// Field names follow the `PascalCase` keys of the JSON format.
///
/// # Examples
/// ```
/// use starhaul_core::{HaulDocument, SimulationConfig};
///
/// let json = r#"{
///     "HaulerCapacity": 4,
///     "Locations": ["depot", "market"],
///     "HaulerStartLocation": "depot",
///     "Distances": { "depot": { "market": 5 } },
///     "Tasks": [{ "From": "depot", "To": "market", "Items": [{ "Volume": 1 }] }]
/// }"#;
/// let document: HaulDocument = serde_json::from_str(json).unwrap();
/// let config = SimulationConfig::try_from(document).unwrap();
/// assert_eq!(config.volumes, vec![1]);
/// assert_eq!(config.distances.at(1, 0), Ok(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct HaulDocument {
    /// Carrier capacity.
    pub hauler_capacity: u32,
    /// Location names; a location's index is its position here.
    pub locations: Vec<String>,
    /// Name of the location the carrier starts at.
    pub hauler_start_location: String,
    /// Distances keyed by location name, in either direction.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distances: BTreeMap<String, BTreeMap<String, u32>>,
    /// Delivery tasks, each moving one or more items.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tasks: Vec<TaskDocument>,
}

/// One delivery entry in a [`HaulDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct TaskDocument {
    /// Pickup location name.
    pub from: String,
    /// Drop-off location name.
    pub to: String,
    /// Items to move; each becomes its own task.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemDocument>,
}

/// An item entry in a [`TaskDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ItemDocument {
    /// Space the item occupies in the carrier.
    pub volume: u32,
}

struct LocationIndex<'a> {
    by_name: HashMap<&'a str, usize>,
}

impl<'a> LocationIndex<'a> {
    fn new(names: &'a [String]) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::NoLocations);
        }
        let mut by_name = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if by_name.insert(name.as_str(), index).is_some() {
                return Err(ConfigError::DuplicateLocation { name: name.clone() });
            }
        }
        Ok(Self { by_name })
    }

    fn resolve(&self, field: &'static str, name: &str) -> Result<usize, ConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownLocation {
                field,
                name: name.to_owned(),
            })
    }
}

impl TryFrom<HaulDocument> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(document: HaulDocument) -> Result<Self, Self::Error> {
        let index = LocationIndex::new(&document.locations)?;
        let start_location =
            index.resolve("HaulerStartLocation", &document.hauler_start_location)?;
        let distances = resolve_distances(&document, &index)?;

        let mut volumes = Vec::new();
        let mut tasks = BTreeMap::new();
        for task in &document.tasks {
            let from = index.resolve("Tasks.From", &task.from)?;
            let to = index.resolve("Tasks.To", &task.to)?;
            for item in &task.items {
                tasks.insert(volumes.len(), Task::new(from, to));
                volumes.push(item.volume);
            }
        }
        debug!(
            "resolved haul document: {} locations, {} items",
            document.locations.len(),
            volumes.len()
        );

        Ok(Self {
            capacity: document.hauler_capacity,
            start_location,
            location_names: document.locations,
            distances,
            volumes,
            tasks,
        })
    }
}

fn resolve_distances(
    document: &HaulDocument,
    index: &LocationIndex<'_>,
) -> Result<SymmetricMatrix<u32>, ConfigError> {
    let order = document.locations.len();
    let mut distances = SymmetricMatrix::with_order(order);
    let mut given: BTreeMap<(usize, usize), u32> = BTreeMap::new();

    for (from_name, row) in &document.distances {
        let from = index.resolve("Distances", from_name)?;
        for (to_name, &distance) in row {
            let to = index.resolve("Distances", to_name)?;
            let pair = (from.min(to), from.max(to));
            if let Some(first) = given.insert(pair, distance)
                && first != distance
            {
                return Err(ConfigError::AsymmetricDistance {
                    from: from_name.clone(),
                    to: to_name.clone(),
                    first,
                    second: distance,
                });
            }
            distances
                .set(from, to, distance)
                .map_err(|_| ConfigError::UnknownLocation {
                    field: "Distances",
                    name: to_name.clone(),
                })?;
        }
    }

    for (from, from_name) in document.locations.iter().enumerate() {
        for (to, to_name) in document.locations.iter().enumerate().skip(from + 1) {
            if !given.contains_key(&(from, to)) {
                warn!("no distance given between {from_name:?} and {to_name:?}; assuming 0");
            }
        }
    }
    Ok(distances)
}
