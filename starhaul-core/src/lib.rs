//! Core model for the starhaul single-carrier pickup-and-delivery planner.
//!
//! A [`Simulation`] pairs immutable haul [`Constants`] with a mutable
//! [`WorldState`]. [`Action`]s move the carrier and its items; a [`Solver`]
//! searches for the cheapest [`Plan`] that completes every [`Task`].
//!
//! Input arrives as a [`HaulDocument`], is resolved into a
//! [`SimulationConfig`] and validated by [`Simulation::new`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod action;
mod config;
pub mod matrix;
mod simulation;
mod solver;
mod state;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use action::{Action, ActionError, MOVE_OVERHEAD, STEP_PENALTY};
pub use config::{ConfigError, HaulDocument, ItemDocument, SimulationConfig, TaskDocument};
pub use matrix::{MatrixError, SymmetricMatrix};
pub use simulation::{Constants, Simulation, SimulationError};
pub use solver::{Diagnostics, Plan, Replay, SolveError, SolveResponse, Solver};
pub use state::{Fingerprint, ItemSet, Placement, Task, WorldState};
