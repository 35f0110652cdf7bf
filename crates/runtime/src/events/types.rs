use serde::{Deserialize, Serialize};

use encounter_core::{CharacterId, EncounterError, Envelope, Notification, Recipient};

/// A notification resolved to the players that must receive it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Simulation clock when the notification was queued.
    pub clock_ms: u64,
    pub recipient: Recipient,
    pub players: Vec<CharacterId>,
    pub notification: Notification,
}

impl NotificationEvent {
    pub fn new(clock_ms: u64, envelope: Envelope) -> Self {
        Self {
            clock_ms,
            recipient: envelope.recipient,
            players: envelope.players,
            notification: envelope.notification,
        }
    }
}

/// Bookkeeping emitted by the simulation worker itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// One tick was applied.
    Ticked {
        clock_ms: u64,
        elapsed_ms: u64,
        characters: usize,
        battlefields: usize,
    },
    /// A command failed and left the encounter unchanged.
    CommandRejected {
        command: String,
        error: EncounterError,
    },
}
