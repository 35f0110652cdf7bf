//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the encounter.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use encounter_core::{Encounter, EncounterConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::workers::SimulationWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub encounter: EncounterConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Wall-clock period between automatic ticks. `None` leaves ticking to
    /// [`RuntimeHandle::tick`].
    pub tick_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            encounter: EncounterConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: None,
        }
    }
}

/// A running encounter simulation backed by one worker task.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Cloneable handle for issuing commands and subscribing to topics.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the simulation worker.
    ///
    /// Waits for the worker to drain; every cloned handle must be dropped
    /// for this to return.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime", "runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    encounter: Option<Encounter>,
    oracles: Option<OracleManager>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            encounter: None,
            oracles: None,
        }
    }

    /// Replace the whole runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a pre-populated encounter instead of an empty one
    pub fn encounter(mut self, encounter: Encounter) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Static data the worker resolves skills and tribes against (required)
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Automatic tick period
    pub fn tick_interval(mut self, period: Duration) -> Self {
        self.config.tick_interval = Some(period);
        self
    }

    /// Spawn the simulation worker and return the running runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let encounter = self
            .encounter
            .unwrap_or_else(|| Encounter::new(self.config.encounter.clone()));

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = SimulationWorker::new(
            encounter,
            oracles,
            command_rx,
            event_bus.clone(),
            self.config.tick_interval,
        );
        let sim_worker_handle = tokio::spawn(worker.run());

        info!(
            target: "runtime",
            tick_interval = ?self.config.tick_interval,
            "runtime started"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            sim_worker_handle,
        })
    }
}
