//! Hostile behavior: an outer Normal/Battle/Dead machine wrapping a combat
//! sub-machine that decides between moving and casting.
mod context;
mod phase;
mod state;

pub use context::{BrainContext, BrainSignal, Countdown};
pub use phase::{judge, Choice, CombatMachine, CombatPhase, PhaseKind};
pub use state::{Battle, HostileBrain, HostileState, Respawn, StateKind, Wander};
