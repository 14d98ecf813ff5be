//! Benchmark support utilities for the DFS solver.
//!
//! Generates deterministic random instances from a seeded RNG so that every
//! benchmark run measures the same search.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starhaul_core::SimulationConfig;
use starhaul_core::test_support::ConfigBuilder;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Largest distance between two generated locations.
const MAX_DISTANCE: u32 = 20;

/// Generate an instance with `locations` locations and `items` unit-volume
/// items, each with distinct random endpoints, and capacity 2.
///
/// # Examples
///
/// ```ignore
/// let config = generate_instance(3, 2, BENCHMARK_SEED);
/// assert_eq!(config.volumes.len(), 2);
/// ```
pub fn generate_instance(locations: usize, items: usize, seed: u64) -> SimulationConfig {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = ConfigBuilder::new(locations).capacity(2);
    for a in 0..locations {
        for b in a + 1..locations {
            builder = builder.distance(a, b, rng.gen_range(1..=MAX_DISTANCE));
        }
    }
    for _ in 0..items {
        let from = rng.gen_range(0..locations);
        let pick = rng.gen_range(0..locations - 1);
        let to = if pick >= from { pick + 1 } else { pick };
        builder = builder.item(1, from, to);
    }
    builder.build()
}
