//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the encounter and is the only task that
//! mutates it.

mod simulation;

pub use simulation::{Command, SimulationWorker};
