//! Event distribution for runtime consumers.
//!
//! Events are split by [`Topic`] so a delivery layer can follow player
//! notifications without also receiving simulation bookkeeping.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{NotificationEvent, SimulationEvent};
