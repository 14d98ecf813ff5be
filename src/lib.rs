//! Facade crate for the starhaul pickup-and-delivery planner.
//!
//! This crate re-exports the core simulation model and, behind the default
//! `solver-dfs` feature, the exhaustive search solver.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-dfs")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::BTreeMap;
//! use starhaul::{DfsSolver, Simulation, SimulationConfig, Solver, SymmetricMatrix, Task};
//!
//! let mut distances = SymmetricMatrix::with_order(2);
//! distances.set(0, 1, 5)?;
//! let simulation = Simulation::new(SimulationConfig {
//!     capacity: 1,
//!     start_location: 0,
//!     location_names: vec!["depot".into(), "market".into()],
//!     distances,
//!     volumes: vec![1],
//!     tasks: BTreeMap::from([(0, Task::new(0, 1))]),
//! })?;
//! let response = DfsSolver::new().solve(&simulation)?;
//! assert_eq!(response.plan.cost, 9);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "solver-dfs"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use starhaul_core::{
    Action, ActionError, ConfigError, Diagnostics, HaulDocument, MOVE_OVERHEAD, MatrixError, Plan,
    Replay, STEP_PENALTY, Simulation, SimulationConfig, SimulationError, SolveError,
    SolveResponse, Solver, SymmetricMatrix, Task, WorldState,
};

#[cfg(feature = "solver-dfs")]
pub use starhaul_solver_dfs::{DfsSolver, Search, SearchStats};
