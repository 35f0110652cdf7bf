//! Runtime orchestration for the combat-encounter simulation.
//!
//! This crate wires oracle access, the simulation worker and the event bus
//! into a cohesive runtime API. Consumers embed [`Runtime`] to drive ticks,
//! subscribe to notifications and issue combat commands through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] adapts loaded content to the engine's oracle traits
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{HostileStatus, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, NotificationEvent, SimulationEvent, Topic};
pub use oracle::{OracleManager, SkillOracleImpl, TribeOracleImpl};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
