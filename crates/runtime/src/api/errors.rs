//! Unified error types surfaced by the runtime API.
use thiserror::Error;
use tokio::sync::oneshot;

use encounter_core::EncounterError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error(transparent)]
    Encounter(#[from] EncounterError),
}
